mod add;
mod clear;
mod convert;
mod crossovers;
mod curves;
mod edit;
mod ranges;
mod rank;
mod remove;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    add::AddArgs,
    clear::ClearArgs,
    convert::ConvertArgs,
    crossovers::CrossoversArgs,
    curves::CurvesArgs,
    edit::EditArgs,
    ranges::RangesArgs,
    rank::RankArgs,
    remove::RemoveArgs,
};
use tariff_compare::{catalog::Catalog, prelude::*, quantity::energy::KilowattHours};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub catalog: CatalogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank the tariffs by annual cost at a specific consumption.
    #[clap(name = "rank")]
    Rank(RankArgs),

    /// List consumptions at which two tariffs cost the same.
    #[clap(name = "crossovers")]
    Crossovers(CrossoversArgs),

    /// Split the consumption range by the cheapest tariff.
    #[clap(name = "ranges")]
    Ranges(RangesArgs),

    /// Tabulate annual costs over the consumption range.
    #[clap(name = "curves")]
    Curves(CurvesArgs),

    /// Export the tariffs into another file, the format follows the extension.
    #[clap(name = "convert")]
    Convert(ConvertArgs),

    /// Add a tariff to the list, creating the file if needed.
    #[clap(name = "add")]
    Add(AddArgs),

    /// Change some fields of a tariff.
    #[clap(name = "edit")]
    Edit(EditArgs),

    /// Remove a tariff from the list.
    #[clap(name = "remove")]
    Remove(RemoveArgs),

    /// Remove all the tariffs from the list.
    #[clap(name = "clear")]
    Clear(ClearArgs),
}

impl Command {
    pub fn run(self, catalog: &CatalogArgs) -> Result {
        match self {
            Self::Rank(args) => args.run(&catalog.read()?),
            Self::Crossovers(args) => args.run(&catalog.read()?),
            Self::Ranges(args) => args.run(&catalog.read()?),
            Self::Curves(args) => args.run(&catalog.read()?),
            Self::Convert(args) => args.run(&catalog.read()?),
            Self::Add(args) => args.run(catalog),
            Self::Edit(args) => args.run(catalog),
            Self::Remove(args) => args.run(catalog),
            Self::Clear(args) => args.run(catalog),
        }
    }
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Tariff list, either `.toml` or `.json`.
    #[clap(long = "tariffs", global = true, env = "TARIFFS_PATH", default_value = "tariffs.toml")]
    pub path: PathBuf,
}

impl CatalogArgs {
    pub fn read(&self) -> Result<Catalog> {
        Catalog::read(&self.path)
    }

    pub fn read_or_default(&self) -> Result<Catalog> {
        Catalog::read_or_default(&self.path)
    }

    pub fn write(&self, catalog: &Catalog) -> Result {
        catalog.write(&self.path)
    }
}

#[derive(Copy, Clone, Parser)]
pub struct MaxConsumptionArgs {
    /// Upper bound of the annual consumption to consider, in kilowatt-hours.
    #[clap(long = "max-consumption", env = "MAX_CONSUMPTION_KWH", default_value = "8000")]
    pub max_consumption: KilowattHours,
}
