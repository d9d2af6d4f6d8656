//! Session registry: which connection holds which seat.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strictly_chess_rules::Side;
use tracing::{debug, info, instrument};

/// Opaque identifier of one client connection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SessionId(u64);

/// Role a session plays in the room.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Slot {
    /// Plays white.
    FirstPlayer,
    /// Plays black.
    SecondPlayer,
    /// Watches; may not move.
    Observer,
    /// Not connected to this room.
    Unassigned,
}

impl Slot {
    /// The side this slot controls, if it is a playing slot.
    ///
    /// The mapping is fixed for the lifetime of the room.
    pub fn side(self) -> Option<Side> {
        match self {
            Slot::FirstPlayer => Some(Side::White),
            Slot::SecondPlayer => Some(Side::Black),
            Slot::Observer | Slot::Unassigned => None,
        }
    }
}

/// Slot assignment table plus the set of connected sessions.
///
/// Invariants: each playing slot holds at most one session, and a session
/// holds at most one slot.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    first_player: Option<SessionId>,
    second_player: Option<SessionId>,
    sessions: HashMap<SessionId, Slot>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection and assigns it a slot.
    ///
    /// First come, first served: `first-player` if free, else
    /// `second-player` if free, else `observer`. A session that is already
    /// registered keeps the slot it has.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn on_connect(&mut self, session: SessionId) -> Slot {
        if let Some(existing) = self.sessions.get(&session) {
            debug!(slot = %existing, "Session already registered");
            return *existing;
        }

        let slot = if self.first_player.is_none() {
            self.first_player = Some(session);
            Slot::FirstPlayer
        } else if self.second_player.is_none() {
            self.second_player = Some(session);
            Slot::SecondPlayer
        } else {
            Slot::Observer
        };

        self.sessions.insert(session, slot);
        info!(%slot, "Assigned slot");
        slot
    }

    /// Removes a connection, releasing its playing slot if it held one.
    ///
    /// Observers are never promoted into the vacated slot. Returns the slot the
    /// session held, or `None` if it was not registered.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn on_disconnect(&mut self, session: SessionId) -> Option<Slot> {
        let slot = self.sessions.remove(&session)?;

        match slot {
            Slot::FirstPlayer => self.first_player = None,
            Slot::SecondPlayer => self.second_player = None,
            Slot::Observer | Slot::Unassigned => {}
        }

        info!(%slot, "Released session");
        Some(slot)
    }

    /// Looks up the slot of a session; unknown sessions are `unassigned`.
    pub fn slot_of(&self, session: SessionId) -> Slot {
        self.sessions
            .get(&session)
            .copied()
            .unwrap_or(Slot::Unassigned)
    }

    /// The session holding a playing slot, if any.
    pub fn holder(&self, slot: Slot) -> Option<SessionId> {
        match slot {
            Slot::FirstPlayer => self.first_player,
            Slot::SecondPlayer => self.second_player,
            Slot::Observer | Slot::Unassigned => None,
        }
    }

    /// Number of connected sessions, observers included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is connected.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
