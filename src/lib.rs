//! Strictly Chess library - a two-player chess relay
//!
//! Clients connect over a WebSocket, are seated first-come-first-served as
//! white, black or observer, and submit moves. The relay decides whether a
//! move may reach the rules engine, commits accepted moves, and broadcasts
//! the authoritative state to everyone in the room.
//!
//! # Architecture
//!
//! - **Session**: slot assignment table ([`SessionRegistry`])
//! - **Arbiter**: turn order and legality gate ([`TurnArbiter`])
//! - **Broadcast**: fan-out of accepted moves, private rejections ([`Broadcaster`])
//! - **Room**: all of the above behind one lock ([`Room`])
//! - **Gateway**: axum WebSocket transport ([`router`], [`serve`])
//!
//! # Example
//!
//! ```
//! use strictly_chess::{Room, RejectReason};
//! use strictly_chess_rules::{ChessRules, MoveIntent};
//!
//! let room = Room::new(ChessRules::new());
//! let (white, _white_rx) = room.connect();
//! let (black, _black_rx) = room.connect();
//!
//! assert_eq!(room.submit_move(black, MoveIntent::new("e7", "e5")), Err(RejectReason::OutOfTurn));
//! assert_eq!(room.submit_move(white, MoveIntent::new("e2", "e4")), Ok(()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arbiter;
mod broadcast;
mod config;
mod error;
mod gateway;
mod protocol;
mod room;
mod session;

// Crate-level exports - Arbitration
pub use arbiter::{Accepted, RejectReason, TurnArbiter};

// Crate-level exports - Fan-out
pub use broadcast::{Broadcaster, Outbox};

// Crate-level exports - Configuration and errors
pub use config::{HOST_ENV, PORT_ENV, RelayConfig, STANDARD_START_FEN};
pub use error::RelayError;

// Crate-level exports - Transport
pub use gateway::{router, serve, serve_on};
pub use protocol::{ClientMessage, ServerMessage, StateSync};

// Crate-level exports - Room and sessions
pub use room::{Room, RoomSnapshot};
pub use session::{SessionId, SessionRegistry, Slot};
