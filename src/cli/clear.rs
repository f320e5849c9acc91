use clap::Parser;

use crate::cli::CatalogArgs;
use tariff_compare::prelude::*;

#[derive(Parser)]
pub struct ClearArgs {
    /// Confirm removing every tariff.
    #[clap(long)]
    yes: bool,
}

impl ClearArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog_args: &CatalogArgs) -> Result {
        ensure!(self.yes, "this removes all the tariffs, pass `--yes` to confirm");
        let mut catalog = catalog_args.read_or_default()?;
        catalog.clear();
        catalog_args.write(&catalog)
    }
}
