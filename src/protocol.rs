//! Wire messages exchanged over the WebSocket.
//!
//! Every frame is a JSON object tagged by `"type"`:
//!
//! ```json
//! {"type":"move-intent","from":"e2","to":"e4"}
//! {"type":"state-sync","fen":"...","turn":"b","status":"ongoing"}
//! ```

use crate::arbiter::RejectReason;
use crate::error::RelayError;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_chess_rules::{GameStatus, MoveIntent, Side};
use tracing::instrument;

/// Full serialized game state, the resync point for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct StateSync {
    /// Board position as FEN.
    fen: String,
    /// Side to move.
    turn: Side,
    /// Whether the game is still running.
    status: GameStatus,
}

/// Messages the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Sent once after connect to a session holding a playing slot.
    RoleAssigned {
        /// The side the session controls.
        side: Side,
    },
    /// Sent once after connect to an observer.
    SpectatorAssigned,
    /// Broadcast when a move is accepted, before the matching state sync.
    MoveApplied {
        /// The accepted move, as submitted.
        #[serde(rename = "move")]
        mv: MoveIntent,
    },
    /// Authoritative game state.
    StateSync(StateSync),
    /// Sent only to the session whose move was refused.
    MoveRejected {
        /// The refused move, or `null` if the frame could not be decoded.
        #[serde(rename = "move")]
        mv: Option<MoveIntent>,
        /// Why it was refused.
        reason: RejectReason,
    },
}

impl ServerMessage {
    /// Encodes the message as a JSON text frame.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Messages clients send to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Request to play a move.
    MoveIntent(MoveIntent),
    /// Request for a fresh state sync.
    SyncRequest,
}

impl ClientMessage {
    /// Decodes a JSON text frame.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(text)?)
    }
}
