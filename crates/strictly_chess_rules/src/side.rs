//! Sides of the board.

use serde::{Deserialize, Serialize};

/// One of the two colours a player can control.
///
/// Serialized as `"w"` / `"b"` on the wire.
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
pub enum Side {
    /// White moves first.
    #[serde(rename = "w")]
    #[strum(serialize = "w")]
    White,
    /// Black moves second.
    #[serde(rename = "b")]
    #[strum(serialize = "b")]
    Black,
}

impl From<chess::Color> for Side {
    fn from(color: chess::Color) -> Self {
        match color {
            chess::Color::White => Side::White,
            chess::Color::Black => Side::Black,
        }
    }
}
