//! Rules engine errors.

/// Why the rules engine refused a move or a position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// A square name could not be parsed.
    #[display("Malformed square '{}'", square)]
    MalformedSquare {
        /// The offending input.
        square: String,
    },

    /// A promotion piece could not be parsed.
    #[display("Malformed promotion piece '{}'", piece)]
    MalformedPromotion {
        /// The offending input.
        piece: String,
    },

    /// The move parsed but is not legal in the current position.
    #[display("Illegal move {}", mv)]
    Illegal {
        /// The move in coordinate notation.
        mv: String,
    },

    /// The game has ended; no further moves are accepted.
    #[display("Game is already over")]
    GameOver,

    /// A starting position could not be loaded.
    #[display("Invalid position '{}': {}", fen, reason)]
    InvalidPosition {
        /// The FEN that failed to load.
        fen: String,
        /// Parser diagnostics.
        reason: String,
    },
}

impl RulesError {
    /// True when the move description could not even be parsed into squares.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            RulesError::MalformedSquare { .. } | RulesError::MalformedPromotion { .. }
        )
    }
}

impl std::error::Error for RulesError {}
