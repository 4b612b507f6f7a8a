#![doc = include_str!("../README.md")]

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::commands;
use cli::config::{CliArgs, Config};
use cli::telemetry::init_telemetry;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry(config.verbose)?;

    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    }

    let stdout = std::io::stdout();
    let result = commands::run(&config, &mut stdout.lock());
    Ok(ExitCode::from(commands::exit_status(&result)))
}
