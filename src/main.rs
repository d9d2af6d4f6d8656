//! Strictly Chess - relay server CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_chess::RelayConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Run the relay server
#[instrument]
async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = RelayConfig::load(config.as_deref())?.with_overrides(host, port);
    config.validate()?;

    info!(addr = %config.bind_addr(), "Starting Strictly Chess relay");
    strictly_chess::serve(&config).await?;
    Ok(())
}

/// Validate a config and print what the server would run with
#[instrument]
fn check_config(config: Option<PathBuf>) -> Result<()> {
    let config = RelayConfig::load(config.as_deref())?;
    config.validate()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
