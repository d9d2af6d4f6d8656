//! Turn arbiter: decides whether a move request may reach the rules engine.

use crate::protocol::StateSync;
use crate::session::{SessionId, SessionRegistry};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use strictly_chess_rules::{MoveIntent, RulesEngine, RulesError};
use tracing::{debug, error, info, instrument, warn};

/// Why a move request was refused.
///
/// Every reason is recoverable: the requester gets a private notice and the
/// game state is left untouched.
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
pub enum RejectReason {
    /// The session is an observer or is not registered.
    NotAPlayer,
    /// The session's side is not the side to move.
    OutOfTurn,
    /// The rules engine refused the move.
    IllegalMove,
    /// The move description could not be parsed into squares.
    MalformedPayload,
}

/// A move the arbiter committed, with the state it produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Accepted {
    /// The move as submitted.
    intent: MoveIntent,
    /// The new authoritative state.
    sync: StateSync,
}

/// Owns the game state and guards every transition of it.
///
/// Every rules engine call made while arbitrating a move runs behind a panic
/// guard, and the state is replaced only once the successor and its
/// client-facing [`StateSync`] have both been produced.
#[derive(Debug)]
pub struct TurnArbiter<R: RulesEngine> {
    rules: R,
    state: R::State,
    sync: StateSync,
}

impl<R: RulesEngine> TurnArbiter<R> {
    /// Creates an arbiter at the rules engine's initial position.
    #[instrument(skip(rules))]
    pub fn new(rules: R) -> Self {
        let state = rules.initial_state();
        let sync = sync_of(&rules, &state);
        Self { rules, state, sync }
    }

    /// The current game state.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// The current state as clients see it.
    pub fn snapshot(&self) -> StateSync {
        self.sync.clone()
    }

    /// Arbitrates one move request.
    ///
    /// Checks, in order: the session holds a playing slot, that slot's side
    /// is the side to move, and the rules engine accepts the move. Only then
    /// is the new state committed.
    ///
    /// # Errors
    ///
    /// Returns the first [`RejectReason`] that applies. The game state is
    /// unchanged whenever an error is returned.
    #[instrument(skip(self, registry, intent), fields(session_id = %session, intent = %intent))]
    pub fn submit_move(
        &mut self,
        registry: &SessionRegistry,
        session: SessionId,
        intent: &MoveIntent,
    ) -> Result<Accepted, RejectReason> {
        let slot = registry.slot_of(session);
        let side = slot.side().ok_or_else(|| {
            warn!(%slot, "Non-player attempted move");
            RejectReason::NotAPlayer
        })?;

        let state = &self.state;
        let to_move = self.guarded(|rules| Ok(rules.current_turn(state)))?;
        if side != to_move {
            warn!(%slot, %side, %to_move, "Player tried to move out of turn");
            return Err(RejectReason::OutOfTurn);
        }

        let (next, sync) = self.guarded(|rules| {
            let next = rules.apply_move(state, intent)?;
            let sync = sync_of(rules, &next);
            Ok((next, sync))
        })?;

        self.state = next;
        self.sync = sync.clone();
        info!(fen = %sync.fen(), status = %sync.status(), "Move accepted");
        Ok(Accepted::new(intent.clone(), sync))
    }

    /// Runs a rules engine call, converting both its errors and its panics
    /// into rejection reasons.
    fn guarded<T>(
        &self,
        call: impl FnOnce(&R) -> Result<T, RulesError>,
    ) -> Result<T, RejectReason> {
        match panic::catch_unwind(AssertUnwindSafe(|| call(&self.rules))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if e.is_malformed() => {
                debug!(error = %e, "Malformed move payload");
                Err(RejectReason::MalformedPayload)
            }
            Ok(Err(e)) => {
                debug!(error = %e, "Rules engine rejected move");
                Err(RejectReason::IllegalMove)
            }
            Err(_) => {
                error!("Rules engine panicked; treating move as illegal");
                Err(RejectReason::IllegalMove)
            }
        }
    }
}

fn sync_of<R: RulesEngine>(rules: &R, state: &R::State) -> StateSync {
    StateSync::new(
        rules.serialize(state),
        rules.current_turn(state),
        rules.status(state),
    )
}
