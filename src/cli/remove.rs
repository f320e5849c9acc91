use clap::Parser;

use crate::cli::CatalogArgs;
use tariff_compare::{core::tariff::TariffId, prelude::*};

#[derive(Parser)]
pub struct RemoveArgs {
    /// Identifier of the tariff to remove.
    id: String,
}

impl RemoveArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog_args: &CatalogArgs) -> Result {
        let mut catalog = catalog_args.read()?;
        let removed = catalog.remove(&TariffId::from(self.id))?;
        catalog_args.write(&catalog)?;
        println!("{}", removed.name);
        Ok(())
    }
}
