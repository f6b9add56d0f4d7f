//! CLI argument parsing and the lookup pipeline.

pub mod args;
pub mod lookup;

use anyhow::Result;
use args::Cli;
use clap::Parser;

use crate::config::{Config, RunConfig};
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    // Load configuration
    let file = Config::load(cli.config.as_deref())?;
    let config = RunConfig::from_sources(&cli, &file)?;

    if !config.color {
        colored::control::set_override(false);
    }

    let rendered = lookup::execute(&config).await?;
    print!("{rendered}");

    Ok(())
}
