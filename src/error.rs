//! Relay infrastructure errors.
//!
//! Move rejections are not errors in this sense; they are ordinary outcomes
//! reported to the client as [`RejectReason`](crate::RejectReason).

use derive_more::{Display, Error};
use tracing::instrument;

/// Startup, configuration or transport failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Relay error: {} at {}:{}", message, file, line)]
pub struct RelayError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RelayError {
    /// Creates a new relay error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for RelayError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for RelayError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse config: {}", err))
    }
}

impl From<serde_json::Error> for RelayError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

impl From<strictly_chess_rules::RulesError> for RelayError {
    #[track_caller]
    fn from(err: strictly_chess_rules::RulesError) -> Self {
        Self::new(format!("Rules engine error: {}", err))
    }
}
