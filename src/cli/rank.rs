use clap::Parser;

use crate::tables::build_ranking_table;
use tariff_compare::{
    catalog::Catalog,
    core::{domain::ensure_consumption, ranking::rank_at},
    prelude::*,
    quantity::energy::KilowattHours,
};

#[derive(Parser)]
pub struct RankArgs {
    /// Annual consumption in kilowatt-hours.
    #[clap(long = "consumption", env = "CONSUMPTION_KWH", default_value = "3500")]
    consumption: KilowattHours,
}

impl RankArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog: &Catalog) -> Result {
        ensure_consumption(self.consumption)?;
        let ranking = rank_at(&catalog.tariffs, self.consumption);
        println!("{}", build_ranking_table(&catalog.tariffs, &ranking));
        if let Some(cheapest) = ranking.cheapest() {
            info!(
                consumption = %self.consumption,
                cheapest = %cheapest.tariff_id,
                cost = %cheapest.cost,
                savings = %ranking.potential_savings(),
                "ranked",
            );
        } else {
            warn!("no tariffs to rank");
        }
        Ok(())
    }
}
