//! [`RulesEngine`] adapter over the `chess` crate.

use crate::{GameStatus, MoveIntent, RulesEngine, RulesError, Side};
use chess::{Board, BoardStatus, ChessMove, Piece, Rank, Square};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Standard chess, with positions serialized as FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessRules {
    start: Board,
}

impl ChessRules {
    /// Rules starting from the standard initial position.
    #[instrument]
    pub fn new() -> Self {
        Self {
            start: Board::default(),
        }
    }

    /// Rules starting from an arbitrary position.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidPosition`] if the FEN does not describe a
    /// valid board.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |reason: String| RulesError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        };
        let placement = fen.split_whitespace().next().unwrap_or_default();
        check_placement(placement).map_err(invalid)?;
        let start = Board::from_str(fen.trim()).map_err(|e| invalid(format!("{:?}", e)))?;
        Ok(Self { start })
    }

    /// Parses a client intent into a concrete move for `board`.
    ///
    /// A pawn reaching the last rank without an explicit promotion piece
    /// promotes to a queen.
    #[instrument(skip(board, intent), fields(intent = %intent))]
    pub fn parse_move(board: &Board, intent: &MoveIntent) -> Result<ChessMove, RulesError> {
        let from = parse_square(&intent.from)?;
        let to = parse_square(&intent.to)?;
        let promotion = match intent.promotion.as_deref() {
            Some(piece) => Some(parse_promotion(piece)?),
            None if is_promotion_square(board, from, to) => Some(Piece::Queen),
            None => None,
        };
        Ok(ChessMove::new(from, to, promotion))
    }
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ChessRules {
    type State = Board;

    fn initial_state(&self) -> Board {
        self.start
    }

    fn current_turn(&self, state: &Board) -> Side {
        Side::from(state.side_to_move())
    }

    #[instrument(skip(self, state, intent), fields(intent = %intent))]
    fn apply_move(&self, state: &Board, intent: &MoveIntent) -> Result<Board, RulesError> {
        if state.status() != BoardStatus::Ongoing {
            return Err(RulesError::GameOver);
        }

        let mv = Self::parse_move(state, intent)?;
        if !state.legal(mv) {
            debug!(%mv, "Rejected by move generator");
            return Err(RulesError::Illegal { mv: mv.to_string() });
        }

        Ok(state.make_move_new(mv))
    }

    fn serialize(&self, state: &Board) -> String {
        state.to_string()
    }

    fn status(&self, state: &Board) -> GameStatus {
        match state.status() {
            BoardStatus::Ongoing => GameStatus::Ongoing,
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Stalemate,
        }
    }
}

/// Checks the piece placement field of a FEN: eight ranks, each covering
/// exactly eight files with known piece letters.
///
/// The `chess` crate trusts this shape and misbehaves on anything else.
fn check_placement(placement: &str) -> Result<(), String> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(format!("expected 8 ranks, found {}", ranks.len()));
    }

    for (index, rank) in ranks.iter().enumerate() {
        let mut files = 0u32;
        for c in rank.chars() {
            files += match c {
                '1'..='8' => c.to_digit(10).unwrap_or_default(),
                'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => 1,
                other => return Err(format!("unexpected '{}' in rank {}", other, 8 - index)),
            };
        }
        if files != 8 {
            return Err(format!("rank {} covers {} files", 8 - index, files));
        }
    }
    Ok(())
}

fn parse_square(input: &str) -> Result<Square, RulesError> {
    let normalized = input.trim().to_ascii_lowercase();
    let malformed = || RulesError::MalformedSquare {
        square: input.to_string(),
    };
    if normalized.len() != 2 {
        return Err(malformed());
    }
    Square::from_str(&normalized).map_err(|_| malformed())
}

fn parse_promotion(input: &str) -> Result<Piece, RulesError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "q" => Ok(Piece::Queen),
        "r" => Ok(Piece::Rook),
        "b" => Ok(Piece::Bishop),
        "n" => Ok(Piece::Knight),
        _ => Err(RulesError::MalformedPromotion {
            piece: input.to_string(),
        }),
    }
}

fn is_promotion_square(board: &Board, from: Square, to: Square) -> bool {
    board.piece_on(from) == Some(Piece::Pawn)
        && matches!(to.get_rank(), Rank::First | Rank::Eighth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_rejects_garbage() {
        assert!(parse_square("e2").is_ok());
        assert!(parse_square(" E2 ").is_ok());
        assert!(parse_square("z9").is_err());
        assert!(parse_square("e22").is_err());
        assert!(parse_square("").is_err());
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(parse_promotion("Q").unwrap(), Piece::Queen);
        assert_eq!(parse_promotion("n").unwrap(), Piece::Knight);
        assert!(parse_promotion("k").unwrap_err().is_malformed());
    }

    #[test]
    fn test_missing_promotion_defaults_to_queen() {
        let board = Board::from_str("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let mv = ChessRules::parse_move(&board, &MoveIntent::new("a7", "a8")).unwrap();
        assert_eq!(mv.get_promotion(), Some(Piece::Queen));
    }

    #[test]
    fn test_plain_move_has_no_promotion() {
        let mv = ChessRules::parse_move(&Board::default(), &MoveIntent::new("e2", "e4")).unwrap();
        assert_eq!(mv.get_promotion(), None);
    }

    #[test]
    fn test_check_placement_shapes() {
        assert!(check_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_ok());
        assert!(check_placement("8/8/8/8/8/8/8").is_err());
        assert!(check_placement("8/8/8/8/8/8/8/8/8").is_err());
        assert!(check_placement("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(check_placement("7/8/8/8/8/8/8/8").is_err());
        assert!(check_placement("8/8/8/8/8/8/8/7x").is_err());
        assert!(check_placement("").is_err());
    }
}
