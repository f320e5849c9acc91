use clap::Parser;

use crate::cli::CatalogArgs;
use tariff_compare::{
    core::tariff::{TariffId, TariffPatch},
    prelude::*,
    quantity::{cost::Cost, fee::MonthlyFee, rate::KilowattHourRate},
};

/// Only the given options are changed.
#[derive(Parser)]
pub struct EditArgs {
    /// Identifier of the tariff to change.
    id: String,

    #[clap(long)]
    name: Option<String>,

    #[clap(long)]
    provider: Option<String>,

    #[clap(long = "unit-price")]
    unit_price: Option<KilowattHourRate>,

    #[clap(long = "base-price")]
    base_price: Option<MonthlyFee>,

    #[clap(long)]
    bonus: Option<Cost>,

    #[clap(long = "contract-months")]
    contract_months: Option<u16>,

    #[clap(long = "price-guarantee-months")]
    price_guarantee_months: Option<u16>,
}

impl EditArgs {
    #[instrument(skip_all, fields(id = %self.id))]
    pub fn run(self, catalog_args: &CatalogArgs) -> Result {
        let mut catalog = catalog_args.read()?;
        let patch = TariffPatch {
            name: self.name,
            provider: self.provider,
            unit_price: self.unit_price,
            base_price: self.base_price,
            bonus: self.bonus,
            contract_months: self.contract_months,
            price_guarantee_months: self.price_guarantee_months,
        };
        catalog.update(&TariffId::from(self.id), patch)?;
        catalog_args.write(&catalog)
    }
}
