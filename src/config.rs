//! Relay configuration.
//!
//! Values are resolved in increasing precedence: built-in defaults, an
//! optional TOML file, environment variables (`.env` included), then CLI
//! flags.

use crate::error::RelayError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_chess_rules::ChessRules;
use tracing::{debug, info, instrument};

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "STRICTLY_CHESS_HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "STRICTLY_CHESS_PORT";

/// Standard chess starting position.
pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Configuration for the relay server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Position the room starts from, as FEN.
    #[serde(default = "default_start_fen")]
    start_fen: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_start_fen() -> String {
    STANDARD_START_FEN.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            start_fen: default_start_fen(),
        }
    }
}

impl RelayConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RelayError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RelayError::new(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded");
        Ok(config)
    }

    /// Resolves the configuration from an optional file plus the process
    /// environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, RelayError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Fails if the port variable is set but is not a valid port number.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RelayError> {
        if let Some(host) = lookup(HOST_ENV) {
            debug!(%host, "Host overridden by environment");
            self.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| RelayError::new(format!("Invalid {} '{}': {}", PORT_ENV, port, e)))?;
            debug!(port = self.port, "Port overridden by environment");
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Builds the rules engine for the configured starting position.
    ///
    /// # Errors
    ///
    /// Fails if `start_fen` is not a valid position.
    #[instrument(skip(self))]
    pub fn rules(&self) -> Result<ChessRules, RelayError> {
        Ok(ChessRules::from_fen(&self.start_fen)?)
    }

    /// Checks that the configuration can start a server.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.host.trim().is_empty() {
            return Err(RelayError::new("Host must not be empty"));
        }
        self.rules().map(|_| ())
    }

    /// Address string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
