//! Strictly - command-line game driver.

use anyhow::Result;
use clap::Parser;
use strictly_cli::{Cli, EngineConfig, commands, init_tracing};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EngineConfig::load_or_default(&cli.config)?;
    init_tracing(config.log_filter_or_default());
    debug!(config = %cli.config.display(), "Starting");

    let output = commands::run(&cli.command, &config)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}
