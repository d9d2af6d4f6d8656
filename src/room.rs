//! The single game room: registry, arbiter and broadcaster behind one lock.
//!
//! Every event (connect, disconnect, move, sync) runs to completion while the
//! room lock is held. Slot table and game state therefore change atomically
//! with respect to each other, and all sessions see broadcasts in the same
//! order. Nothing under the lock blocks: the rules engine is pure and outbox
//! sends are unbounded.

use crate::arbiter::{RejectReason, TurnArbiter};
use crate::broadcast::Broadcaster;
use crate::protocol::{ServerMessage, StateSync};
use crate::session::{SessionId, SessionRegistry, Slot};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_chess_rules::{MoveIntent, RulesEngine};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{info, instrument, warn};

/// Everything the room owns. Only reachable through [`Room`]'s lock.
#[derive(Debug)]
struct RoomState<R: RulesEngine> {
    registry: SessionRegistry,
    arbiter: TurnArbiter<R>,
    broadcaster: Broadcaster,
}

/// Read-only view of the room for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RoomSnapshot {
    /// Current game state.
    state: StateSync,
    /// Session playing white.
    first_player: Option<SessionId>,
    /// Session playing black.
    second_player: Option<SessionId>,
    /// Connected sessions, observers included.
    sessions: usize,
}

/// Shared handle to the process-wide room.
///
/// Cloning the handle shares the same room.
pub struct Room<R: RulesEngine> {
    state: Arc<Mutex<RoomState<R>>>,
    next_session: Arc<AtomicU64>,
}

impl<R: RulesEngine> Clone for Room<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            next_session: Arc::clone(&self.next_session),
        }
    }
}

impl<R: RulesEngine> Room<R> {
    /// Opens a room at the rules engine's initial position.
    #[instrument(skip(rules))]
    pub fn new(rules: R) -> Self {
        info!("Opening game room");
        Self {
            state: Arc::new(Mutex::new(RoomState {
                registry: SessionRegistry::new(),
                arbiter: TurnArbiter::new(rules),
                broadcaster: Broadcaster::new(),
            })),
            next_session: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Admits a new connection.
    ///
    /// The session is assigned a slot and immediately receives its role
    /// message followed by the current state. Returns the session id and the
    /// receiving end of its outbox.
    #[instrument(skip(self))]
    pub fn connect(&self) -> (SessionId, UnboundedReceiver<ServerMessage>) {
        let session = SessionId::from(self.next_session.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = unbounded_channel();

        let mut guard = self.lock();
        let room = &mut *guard;
        let slot = room.registry.on_connect(session);
        room.broadcaster.register(session, tx);
        room.broadcaster.on_slot_assigned(session, slot);
        room.broadcaster.send_state(session, room.arbiter.snapshot());

        info!(session_id = %session, %slot, "Session connected");
        (session, rx)
    }

    /// Removes a connection. Idempotent.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn disconnect(&self, session: SessionId) -> Option<Slot> {
        let mut guard = self.lock();
        let room = &mut *guard;
        room.broadcaster.prune(session);
        let released = room.registry.on_disconnect(session);
        if let Some(slot) = released {
            info!(%slot, "Session disconnected");
        }
        released
    }

    /// Arbitrates a move and publishes the outcome.
    ///
    /// Accepted moves are broadcast to every session; rejections go only to
    /// the submitter. The outcome is also returned to the caller.
    #[instrument(skip(self, intent), fields(session_id = %session, intent = %intent))]
    pub fn submit_move(&self, session: SessionId, intent: MoveIntent) -> Result<(), RejectReason> {
        let mut guard = self.lock();
        let room = &mut *guard;
        match room.arbiter.submit_move(&room.registry, session, &intent) {
            Ok(accepted) => {
                room.broadcaster.on_accepted(&accepted);
                Ok(())
            }
            Err(reason) => {
                info!(%reason, "Move rejected");
                room.broadcaster.on_rejected(session, Some(intent), reason);
                Err(reason)
            }
        }
    }

    /// Answers a frame that could not be decoded at all.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn reject_malformed(&self, session: SessionId) {
        self.lock()
            .broadcaster
            .on_rejected(session, None, RejectReason::MalformedPayload);
    }

    /// Sends the current state to one session.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn request_sync(&self, session: SessionId) {
        let room = self.lock();
        room.broadcaster.send_state(session, room.arbiter.snapshot());
    }

    /// Slot currently held by a session.
    pub fn slot_of(&self, session: SessionId) -> Slot {
        self.lock().registry.slot_of(session)
    }

    /// Current game state as clients see it.
    pub fn state(&self) -> StateSync {
        self.lock().arbiter.snapshot()
    }

    /// Game state plus seat occupancy.
    pub fn snapshot(&self) -> RoomSnapshot {
        let room = self.lock();
        RoomSnapshot {
            state: room.arbiter.snapshot(),
            first_player: room.registry.holder(Slot::FirstPlayer),
            second_player: room.registry.holder(Slot::SecondPlayer),
            sessions: room.registry.len(),
        }
    }

    // Rules engine panics are caught inside the arbiter, which commits a new
    // state together with its sync only after every engine call returned. A
    // guard poisoned elsewhere still holds a consistent room.
    fn lock(&self) -> MutexGuard<'_, RoomState<R>> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Room lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}
