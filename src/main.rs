mod cli;
mod tables;

use clap::{Parser, crate_version};

use crate::cli::Args;
use tariff_compare::prelude::*;

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    args.command.run(&args.catalog)?;

    info!("done!");
    Ok(())
}
