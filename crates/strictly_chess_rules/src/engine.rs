//! The rules engine contract.

use crate::{MoveIntent, RulesError, Side};
use serde::{Deserialize, Serialize};

/// Outcome of the position, as far as the relay needs to know.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Moves are still possible.
    Ongoing,
    /// The side to move is mated.
    Checkmate,
    /// The side to move has no legal move but is not in check.
    Stalemate,
}

/// Pure functions over an immutable game state.
///
/// Implementations must report bad input through `Err` rather than panicking.
/// Callers are still expected to guard the boundary.
pub trait RulesEngine: Send + 'static {
    /// Immutable game state value.
    type State: Clone + Send + std::fmt::Debug;

    /// The position a new room starts from.
    fn initial_state(&self) -> Self::State;

    /// Which side is allowed to move.
    fn current_turn(&self, state: &Self::State) -> Side;

    /// Applies a move, returning the successor state.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] when the intent cannot be parsed or is illegal.
    fn apply_move(
        &self,
        state: &Self::State,
        intent: &MoveIntent,
    ) -> Result<Self::State, RulesError>;

    /// Serializes the state for clients.
    fn serialize(&self, state: &Self::State) -> String;

    /// Reports whether the game is still running.
    fn status(&self, state: &Self::State) -> GameStatus;
}
