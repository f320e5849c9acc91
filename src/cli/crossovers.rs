use clap::Parser;

use crate::{cli::MaxConsumptionArgs, tables::build_crossovers_table};
use tariff_compare::{
    catalog::Catalog,
    core::{crossover::find_crossovers, domain::ensure_max_consumption},
    prelude::*,
};

#[derive(Parser)]
pub struct CrossoversArgs {
    #[clap(flatten)]
    domain: MaxConsumptionArgs,
}

impl CrossoversArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog: &Catalog) -> Result {
        ensure_max_consumption(self.domain.max_consumption)?;
        let crossovers = find_crossovers(&catalog.tariffs, self.domain.max_consumption);
        if crossovers.is_empty() {
            info!(max_consumption = %self.domain.max_consumption, "no tariffs cross each other");
        } else {
            println!("{}", build_crossovers_table(&catalog.tariffs, &crossovers));
        }
        Ok(())
    }
}
