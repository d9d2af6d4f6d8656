//! Tests for the chess rules adapter.

use strictly_chess_rules::{ChessRules, GameStatus, MoveIntent, RulesEngine, RulesError, Side};

fn play(rules: &ChessRules, moves: &[(&str, &str)]) -> chess::Board {
    moves.iter().fold(rules.initial_state(), |state, (from, to)| {
        rules
            .apply_move(&state, &MoveIntent::new(*from, *to))
            .unwrap_or_else(|e| panic!("{}{} should be legal: {}", from, to, e))
    })
}

#[test]
fn test_initial_position_is_white_to_move() {
    let rules = ChessRules::new();
    let state = rules.initial_state();

    assert_eq!(rules.current_turn(&state), Side::White);
    assert_eq!(rules.status(&state), GameStatus::Ongoing);
    assert!(
        rules
            .serialize(&state)
            .starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq")
    );
}

#[test]
fn test_turn_alternates() {
    let rules = ChessRules::new();
    let state = play(&rules, &[("e2", "e4")]);
    assert_eq!(rules.current_turn(&state), Side::Black);

    let state = rules.apply_move(&state, &MoveIntent::new("e7", "e5")).unwrap();
    assert_eq!(rules.current_turn(&state), Side::White);
}

#[test]
fn test_same_square_is_illegal() {
    let rules = ChessRules::new();
    let state = rules.initial_state();

    let err = rules.apply_move(&state, &MoveIntent::new("e2", "e2")).unwrap_err();
    assert!(matches!(err, RulesError::Illegal { .. }));
    assert!(!err.is_malformed());
}

#[test]
fn test_nonexistent_square_is_malformed() {
    let rules = ChessRules::new();
    let state = rules.initial_state();

    let err = rules.apply_move(&state, &MoveIntent::new("e2", "e9")).unwrap_err();
    assert!(err.is_malformed());

    let err = rules.apply_move(&state, &MoveIntent::new("", "e4")).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_bad_promotion_piece_is_malformed() {
    let rules = ChessRules::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let state = rules.initial_state();

    let err = rules
        .apply_move(&state, &MoveIntent::new("a7", "a8").with_promotion("x"))
        .unwrap_err();
    assert!(err.is_malformed());

    let next = rules
        .apply_move(&state, &MoveIntent::new("a7", "a8").with_promotion("n"))
        .unwrap();
    assert!(rules.serialize(&next).starts_with("N7/"));
}

#[test]
fn test_moving_the_wrong_colour_is_illegal() {
    let rules = ChessRules::new();
    let state = rules.initial_state();

    let err = rules.apply_move(&state, &MoveIntent::new("e7", "e5")).unwrap_err();
    assert!(matches!(err, RulesError::Illegal { .. }));
}

#[test]
fn test_rejection_leaves_state_untouched() {
    let rules = ChessRules::new();
    let state = play(&rules, &[("d2", "d4")]);
    let before = rules.serialize(&state);

    let _ = rules.apply_move(&state, &MoveIntent::new("d4", "d6"));
    assert_eq!(rules.serialize(&state), before);
}

#[test]
fn test_checkmate_ends_the_game() {
    let rules = ChessRules::new();
    let state = play(
        &rules,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );

    assert_eq!(rules.status(&state), GameStatus::Checkmate);
    let err = rules.apply_move(&state, &MoveIntent::new("a2", "a3")).unwrap_err();
    assert_eq!(err, RulesError::GameOver);
}

#[test]
fn test_stalemate_is_reported() {
    let rules = ChessRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(rules.status(&rules.initial_state()), GameStatus::Stalemate);
}

#[test]
fn test_invalid_fen_is_rejected() {
    let err = ChessRules::from_fen("not a position").unwrap_err();
    assert!(matches!(err, RulesError::InvalidPosition { .. }));
}

#[test]
fn test_rank_with_nine_files_is_rejected() {
    let fen = "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let err = ChessRules::from_fen(fen).unwrap_err();
    assert!(matches!(err, RulesError::InvalidPosition { .. }));
}

#[test]
fn test_nine_ranks_are_rejected() {
    let err = ChessRules::from_fen("8/8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
    assert!(matches!(err, RulesError::InvalidPosition { .. }));
}
