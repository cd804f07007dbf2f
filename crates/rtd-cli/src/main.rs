//! Read the Docs assistant CLI
//!
//! Migrates Read the Docs configuration files, either in a GitHub
//! repository or on disk.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `info`, `debug` with `-v`)
//! - `GH_USERNAME`, `GH_TOKEN`: GitHub credentials for `migrate-config`

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::MigrateConfig(args) => commands::run_migrate_config(args).await,
        Commands::MigrateFile(args) => commands::run_migrate_file(args).await,
        Commands::ListMigrators => commands::run_list_migrators(),
    }
}
