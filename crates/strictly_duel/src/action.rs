//! First-class action types for the duel.
//!
//! Actions are domain events, not side effects. They carry the player's
//! intent and are validated by contracts before the rules engine applies them.

use super::phases::Phase;
use super::position::Position;
use super::types::Side;
use serde::{Deserialize, Serialize};

/// A movement-phase relocation of one token to an adjacent empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Cell the token leaves.
    pub from: Position,
    /// Cell the token enters.
    pub to: Position,
}

impl Move {
    /// The same move played backwards.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from.label(), self.to.label())
    }
}

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applied {
    /// A token was placed.
    Placed {
        /// Side that placed.
        side: Side,
        /// Where the token went.
        at: Position,
    },
    /// A token was selected for movement.
    Selected {
        /// Side that selected.
        side: Side,
        /// Selected cell.
        at: Position,
    },
    /// A token was moved.
    Moved {
        /// Side that moved.
        side: Side,
        /// The relocation.
        mv: Move,
    },
}

/// Reason an action was rejected. The match state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum InvalidAction {
    /// The match already has a winner.
    #[display("Match is already over")]
    MatchOver,

    /// The action belongs to the other phase.
    #[display("Action requires the {} phase", expected)]
    WrongPhase {
        /// Phase the action needs.
        expected: Phase,
    },

    /// The target cell is taken.
    #[display("{} is already occupied", _0)]
    CellOccupied(Position),

    /// The side has already placed all its tokens.
    #[display("{} has no tokens left to place", _0)]
    NoPlacementsLeft(Side),

    /// The cell does not hold the active side's token.
    #[display("{} does not hold your token", _0)]
    NotYourToken(Position),

    /// The center lock only allows the center token to be selected.
    #[display("Center lock: only the center token may move, not {}", _0)]
    CenterLocked(Position),

    /// A destination was given before any token was selected.
    #[display("Select a token before moving")]
    NoSelection,

    /// The destination is not one step from the selected token.
    #[display("{} is not adjacent to {}", to, from)]
    NotAdjacent {
        /// Selected cell.
        from: Position,
        /// Requested destination.
        to: Position,
    },

    /// The seat acting is not the one to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Side),

    /// The computer is deciding; human input is ignored until it moves.
    #[display("The computer is thinking")]
    ComputerThinking,
}

impl std::error::Error for InvalidAction {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_swaps_ends() {
        let mv = Move::new(Position::TopLeft, Position::Center);
        assert_eq!(mv.reversed(), Move::new(Position::Center, Position::TopLeft));
    }

    #[test]
    fn test_invalid_action_messages() {
        let err = InvalidAction::NotAdjacent {
            from: Position::TopLeft,
            to: Position::BottomRight,
        };
        assert_eq!(err.to_string(), "Bottom-right is not adjacent to Top-left");
        assert_eq!(
            InvalidAction::CellOccupied(Position::Center).to_string(),
            "Center is already occupied"
        );
    }
}
