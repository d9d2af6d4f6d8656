//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Chess - two-player chess relay with turn arbitration
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Two-player chess relay over WebSockets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay server
    Serve {
        /// Host to bind to (overrides config and environment)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and environment)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Load a config file, validate it and print the resolved values
    CheckConfig {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
