//! sharefile - share one file over HTTP with its SHA-256
//!
//! Entry point for the server and the helper subcommands.

mod cli;

use clap::Parser;
use cli::Args;
use sharefile::config;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Ignoring config file: {:#}", e);
    }

    ExitCode::from(cli::run(args, &config).await)
}
