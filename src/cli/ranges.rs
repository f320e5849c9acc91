use clap::Parser;

use crate::{cli::MaxConsumptionArgs, tables::build_ranges_table};
use tariff_compare::{
    catalog::Catalog,
    core::{domain::ConsumptionDomain, partition::partition_by_optimal_tariff},
    prelude::*,
    quantity::energy::KilowattHours,
};

#[derive(Parser)]
pub struct RangesArgs {
    #[clap(flatten)]
    domain: MaxConsumptionArgs,

    /// Sweep step in kilowatt-hours, smaller is more precise.
    #[clap(long = "resolution", env = "RESOLUTION_KWH", default_value = "250")]
    resolution: KilowattHours,
}

impl RangesArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog: &Catalog) -> Result {
        let domain = ConsumptionDomain::try_new(self.domain.max_consumption, self.resolution)?;
        let ranges = partition_by_optimal_tariff(&catalog.tariffs, &domain);
        if ranges.is_empty() {
            warn!("no tariffs to compare");
        } else {
            println!("{}", build_ranges_table(&catalog.tariffs, &ranges));
        }
        Ok(())
    }
}
