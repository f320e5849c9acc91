use clap::Parser;

use crate::cli::CatalogArgs;
use tariff_compare::{
    core::tariff::Tariff,
    prelude::*,
    quantity::{cost::Cost, fee::MonthlyFee, rate::KilowattHourRate},
};

#[derive(Parser)]
pub struct AddArgs {
    /// Unique identifier, derived from the name when omitted.
    #[clap(long)]
    id: Option<String>,

    #[clap(long)]
    name: String,

    #[clap(long)]
    provider: Option<String>,

    /// Price per kilowatt-hour, in euros.
    #[clap(long = "unit-price")]
    unit_price: KilowattHourRate,

    /// Fixed monthly fee, in euros.
    #[clap(long = "base-price")]
    base_price: MonthlyFee,

    /// One-time bonus, in euros.
    #[clap(long, default_value = "0")]
    bonus: Cost,

    #[clap(long = "contract-months")]
    contract_months: Option<u16>,

    #[clap(long = "price-guarantee-months")]
    price_guarantee_months: Option<u16>,
}

impl AddArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog_args: &CatalogArgs) -> Result {
        let mut catalog = catalog_args.read_or_default()?;
        let tariff = Tariff::builder()
            .id(self.id.unwrap_or_default())
            .name(self.name)
            .maybe_provider(self.provider)
            .unit_price(self.unit_price)
            .base_price(self.base_price)
            .bonus(self.bonus)
            .maybe_contract_months(self.contract_months)
            .maybe_price_guarantee_months(self.price_guarantee_months)
            .build();
        let id = catalog.add(tariff)?;
        catalog_args.write(&catalog)?;
        println!("{id}");
        Ok(())
    }
}
