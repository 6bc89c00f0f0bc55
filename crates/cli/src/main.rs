//! `gtools` command line tool
//!
//! Thin front end over `gtools-nuclide` queries, with reference tables taken
//! either from the built-in dataset or from `--data`.

mod cli;
mod commands;
mod error;
mod logging;

// standard library
use std::error::Error;

// external crates
use clap::Parser;
use log::{debug, error};

// internal modules
use crate::cli::{Cli, Commands};
use crate::commands::Session;
use crate::error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!("{cli:?}");
    let session = || Session::new(cli.data.as_deref(), cli.config.as_deref(), cli.json);

    match &cli.command {
        Commands::Search(args) => commands::query::search(&session()?, args),
        Commands::Lines(args) => commands::query::lines(&session()?, args),
        Commands::Chain(args) => commands::query::chain(&session()?, args),
        Commands::Spectrum(args) => commands::query::spectrum(&session()?, args),
        Commands::Xray(args) => commands::query::xray(&session()?, args),
        Commands::Export(args) => commands::data::export(&session()?, args),
        Commands::Fetch(args) => commands::data::fetch(args),
    }
}
