use clap::Parser;

use crate::{cli::MaxConsumptionArgs, tables::build_curves_table};
use tariff_compare::{
    catalog::Catalog,
    core::{curve::cost_curves, domain::ConsumptionDomain},
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Columns are rendered side by side, so keep them at a readable count.
const MAX_COLUMNS: usize = 41;

#[derive(Parser)]
pub struct CurvesArgs {
    #[clap(flatten)]
    domain: MaxConsumptionArgs,

    /// Column step in kilowatt-hours.
    #[clap(long = "resolution", env = "CURVES_RESOLUTION_KWH", default_value = "500")]
    resolution: KilowattHours,
}

impl CurvesArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog: &Catalog) -> Result {
        let domain = ConsumptionDomain::try_new(self.domain.max_consumption, self.resolution)?;
        ensure!(
            domain.n_samples() <= MAX_COLUMNS,
            "{} columns do not fit into a table, increase the resolution",
            domain.n_samples(),
        );
        let curves = cost_curves(&catalog.tariffs, &domain);
        if curves.is_empty() {
            warn!("no tariffs to compare");
        } else {
            println!("{}", build_curves_table(&catalog.tariffs, &curves));
        }
        Ok(())
    }
}
