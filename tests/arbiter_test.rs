//! Tests for turn arbitration against the chess rules engine.

use strictly_chess::{RejectReason, SessionId, SessionRegistry, TurnArbiter};
use strictly_chess_rules::{ChessRules, MoveIntent, Side};

struct Table {
    registry: SessionRegistry,
    arbiter: TurnArbiter<ChessRules>,
    white: SessionId,
    black: SessionId,
    observer: SessionId,
}

fn table() -> Table {
    let mut registry = SessionRegistry::new();
    let white = SessionId::from(1);
    let black = SessionId::from(2);
    let observer = SessionId::from(3);
    registry.on_connect(white);
    registry.on_connect(black);
    registry.on_connect(observer);
    Table {
        registry,
        arbiter: TurnArbiter::new(ChessRules::new()),
        white,
        black,
        observer,
    }
}

impl Table {
    fn submit(&mut self, session: SessionId, from: &str, to: &str) -> Result<(), RejectReason> {
        self.arbiter
            .submit_move(&self.registry, session, &MoveIntent::new(from, to))
            .map(|_| ())
    }

    fn fen(&self) -> String {
        self.arbiter.snapshot().fen().clone()
    }
}

#[test]
fn test_out_of_turn_never_mutates_state() {
    let mut t = table();
    let before = t.fen();

    assert_eq!(t.submit(t.black, "e7", "e5"), Err(RejectReason::OutOfTurn));
    assert_eq!(t.fen(), before);

    t.submit(t.white, "e2", "e4").unwrap();
    let before = t.fen();
    assert_eq!(t.submit(t.white, "d2", "d4"), Err(RejectReason::OutOfTurn));
    assert_eq!(t.fen(), before);
}

#[test]
fn test_turn_check_precedes_legality() {
    let mut t = table();
    // Garbage from the wrong side is still out-of-turn.
    assert_eq!(t.submit(t.black, "zz", "e5"), Err(RejectReason::OutOfTurn));
}

#[test]
fn test_observer_cannot_move() {
    let mut t = table();
    let before = t.fen();
    assert_eq!(t.submit(t.observer, "e2", "e4"), Err(RejectReason::NotAPlayer));
    assert_eq!(t.fen(), before);
}

#[test]
fn test_structurally_invalid_moves() {
    let mut t = table();
    let before = t.fen();

    assert_eq!(t.submit(t.white, "e2", "e2"), Err(RejectReason::IllegalMove));
    assert_eq!(t.submit(t.white, "e2", "e9"), Err(RejectReason::MalformedPayload));
    assert_eq!(t.submit(t.white, "i1", "e4"), Err(RejectReason::MalformedPayload));
    assert_eq!(t.submit(t.white, "e2", "e5"), Err(RejectReason::IllegalMove));
    assert_eq!(t.fen(), before);
}

#[test]
fn test_rejections_are_idempotent() {
    let mut t = table();
    for _ in 0..3 {
        assert_eq!(t.submit(t.white, "e2", "e5"), Err(RejectReason::IllegalMove));
        assert_eq!(t.submit(t.black, "e7", "e5"), Err(RejectReason::OutOfTurn));
        assert_eq!(t.submit(t.observer, "e2", "e4"), Err(RejectReason::NotAPlayer));
    }
    assert_eq!(t.arbiter.snapshot().turn(), &Side::White);
}

#[test]
fn test_vacated_seat_cannot_move() {
    let mut t = table();
    t.registry.on_disconnect(t.white);
    assert_eq!(t.submit(t.white, "e2", "e4"), Err(RejectReason::NotAPlayer));
}

#[test]
fn test_game_over_rejects_further_moves() {
    let mut t = table();
    t.submit(t.white, "f2", "f3").unwrap();
    t.submit(t.black, "e7", "e5").unwrap();
    t.submit(t.white, "g2", "g4").unwrap();
    t.submit(t.black, "d8", "h4").unwrap();

    assert_eq!(
        t.arbiter.snapshot().status(),
        &strictly_chess_rules::GameStatus::Checkmate
    );
    assert_eq!(t.submit(t.white, "a2", "a3"), Err(RejectReason::IllegalMove));
}
