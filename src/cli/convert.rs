use std::path::PathBuf;

use clap::Parser;

use tariff_compare::{catalog::Catalog, prelude::*};

#[derive(Parser)]
pub struct ConvertArgs {
    /// Target file, `.toml` or `.json`.
    #[clap(long, short)]
    output: PathBuf,
}

impl ConvertArgs {
    #[instrument(skip_all)]
    pub fn run(self, catalog: &Catalog) -> Result {
        catalog.write(&self.output)
    }
}
