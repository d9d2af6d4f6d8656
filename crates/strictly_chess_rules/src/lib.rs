//! Rules engine boundary for strictly_chess.
//!
//! The relay never reasons about chess itself. It talks to a [`RulesEngine`]
//! that answers three questions about an immutable game state:
//!
//! - whose turn is it ([`RulesEngine::current_turn`])
//! - what does the board look like after this move ([`RulesEngine::apply_move`])
//! - how is the state written down for clients ([`RulesEngine::serialize`])
//!
//! [`ChessRules`] is the production adapter, backed by the `chess` crate.
//!
//! # Example
//!
//! ```
//! use strictly_chess_rules::{ChessRules, MoveIntent, RulesEngine, Side};
//!
//! let rules = ChessRules::new();
//! let start = rules.initial_state();
//! assert_eq!(rules.current_turn(&start), Side::White);
//!
//! let next = rules.apply_move(&start, &MoveIntent::new("e2", "e4")).unwrap();
//! assert_eq!(rules.current_turn(&next), Side::Black);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chess_rules;
mod engine;
mod error;
mod intent;
mod side;

pub use chess_rules::ChessRules;
pub use engine::{GameStatus, RulesEngine};
pub use error::RulesError;
pub use intent::MoveIntent;
pub use side::Side;
