//! Match phases and outcomes.

use super::types::{Side, Token};
use serde::{Deserialize, Serialize};

/// Phase of a match in progress.
///
/// A match moves from `Placement` to `Movement` once, when both sides
/// have placed all their tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Sides take turns adding tokens to empty cells.
    #[strum(to_string = "placement")]
    Placement,
    /// Sides take turns sliding one token to an adjacent empty cell.
    #[strum(to_string = "movement")]
    Movement,
}

/// Outcome of a finished match.
///
/// Three cells are always empty, so at least one side can always move and
/// a match only ends with a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Winning side.
    pub winner: Side,
    /// Token the winner played.
    pub token: Token,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} {} wins", self.winner, self.token.glyph())
    }
}
