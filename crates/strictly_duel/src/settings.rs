//! Match settings: who plays the second seat and who moves first.

use super::types::Side;
use serde::{Deserialize, Serialize};

/// Strength of the computer opponent.
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
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random placements and moves behind the safety net.
    Easy,
    /// Center-then-corner placements.
    Medium,
    /// Alpha-beta search.
    Hard,
}

/// Who controls seat `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    HumanVsHuman,
    /// The computer plays `O` at the given difficulty.
    VsComputer(Difficulty),
}

impl Mode {
    /// Returns true if `side` is played by the computer.
    pub fn is_computer(self, side: Side) -> bool {
        matches!(self, Mode::VsComputer(_)) && side == Side::O
    }

    /// Computer difficulty, if the computer plays.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Mode::HumanVsHuman => None,
            Mode::VsComputer(difficulty) => Some(difficulty),
        }
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> String {
        match self {
            Mode::HumanVsHuman => "Player vs Player".to_string(),
            Mode::VsComputer(difficulty) => format!("Player vs Computer ({difficulty})"),
        }
    }
}

/// Which seat takes the first turn of a new match.
///
/// Seat `X` opens unless set otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FirstPlayer {
    /// Seat `X` (the human) opens.
    #[default]
    Human,
    /// Seat `O` (player two or the computer) opens.
    Opponent,
}

impl FirstPlayer {
    /// Seat that opens.
    pub fn side(self) -> Side {
        match self {
            Self::Human => Side::X,
            Self::Opponent => Side::O,
        }
    }
}
