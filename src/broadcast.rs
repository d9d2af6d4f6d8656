//! Broadcast coordinator: fan-out to every connected session.

use crate::arbiter::{Accepted, RejectReason};
use crate::protocol::{ServerMessage, StateSync};
use crate::session::{SessionId, Slot};
use std::collections::HashMap;
use strictly_chess_rules::MoveIntent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, instrument, warn};

/// Sending half of a session's outbound queue.
pub type Outbox = UnboundedSender<ServerMessage>;

/// Holds one outbox per connected session.
///
/// Sends never block: each outbox is an unbounded channel drained by the
/// session's socket writer. A send to a session whose writer has gone away
/// is logged and otherwise ignored; the session is pruned when the gateway
/// reports the disconnect.
#[derive(Debug, Default)]
pub struct Broadcaster {
    outboxes: HashMap<SessionId, Outbox>,
}

impl Broadcaster {
    /// Creates a broadcaster with no sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session to the fan-out list.
    #[instrument(skip(self, outbox), fields(session_id = %session))]
    pub fn register(&mut self, session: SessionId, outbox: Outbox) {
        self.outboxes.insert(session, outbox);
    }

    /// Removes a session from the fan-out list. Returns whether it was present.
    #[instrument(skip(self), fields(session_id = %session))]
    pub fn prune(&mut self, session: SessionId) -> bool {
        self.outboxes.remove(&session).is_some()
    }

    /// Number of sessions receiving broadcasts.
    pub fn len(&self) -> usize {
        self.outboxes.len()
    }

    /// Whether no session receives broadcasts.
    pub fn is_empty(&self) -> bool {
        self.outboxes.is_empty()
    }

    /// Tells a freshly connected session what role it has.
    pub fn on_slot_assigned(&self, session: SessionId, slot: Slot) {
        let message = match slot.side() {
            Some(side) => ServerMessage::RoleAssigned { side },
            None => ServerMessage::SpectatorAssigned,
        };
        self.unicast(session, message);
    }

    /// Publishes an accepted move, then the state it produced, to everyone.
    pub fn on_accepted(&self, accepted: &Accepted) {
        self.broadcast(ServerMessage::MoveApplied {
            mv: accepted.intent().clone(),
        });
        self.broadcast(ServerMessage::StateSync(accepted.sync().clone()));
    }

    /// Tells one session its move was refused.
    pub fn on_rejected(
        &self,
        session: SessionId,
        intent: Option<MoveIntent>,
        reason: RejectReason,
    ) {
        self.unicast(session, ServerMessage::MoveRejected { mv: intent, reason });
    }

    /// Sends the current state to one session.
    pub fn send_state(&self, session: SessionId, sync: StateSync) {
        self.unicast(session, ServerMessage::StateSync(sync));
    }

    fn unicast(&self, session: SessionId, message: ServerMessage) {
        match self.outboxes.get(&session) {
            Some(outbox) => {
                if let Err(e) = outbox.send(message) {
                    warn!(%session, error = %e, "Failed unicast");
                }
            }
            None => debug!(%session, "Unicast to unknown session dropped"),
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        self.outboxes
            .iter()
            .filter_map(|(session, outbox)| {
                outbox.send(message.clone()).err().map(|e| (session, e))
            })
            .for_each(|(session, e)| warn!(%session, error = %e, "Failed broadcast"));
    }
}
