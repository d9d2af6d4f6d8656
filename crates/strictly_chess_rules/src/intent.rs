//! Move intents as clients describe them.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move as requested by a client: origin square, destination square and
/// an optional promotion piece.
///
/// Squares are kept as the raw strings the client sent. Whether they name
/// real squares is the rules engine's call, so a malformed intent is still a
/// value the relay can echo back in a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Origin square in algebraic notation (`e2`).
    pub from: String,
    /// Destination square in algebraic notation (`e4`).
    pub to: String,
    /// Promotion piece letter (`q`, `r`, `b`, `n`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl MoveIntent {
    /// Creates a move intent without promotion.
    #[instrument(skip(from, to))]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            promotion: None,
        }
    }

    /// Sets the promotion piece.
    pub fn with_promotion(mut self, piece: impl Into<String>) -> Self {
        self.promotion = Some(piece.into());
        self
    }
}

impl std::fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = &self.promotion {
            write!(f, "{}", piece)?;
        }
        Ok(())
    }
}
