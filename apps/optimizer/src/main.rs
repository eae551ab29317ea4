mod analysis;
mod assembler;
mod cli;
mod config;
mod document;
mod errors;
mod fields;
mod resume;
mod story;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume optimizer v{}", env!("CARGO_PKG_VERSION"));

    match cli::run(cli, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            err.log();
            cli::report_error(&mut std::io::stdout(), &err).context("failed to report error")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
