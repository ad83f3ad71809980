//! Contract-based validation for duel actions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions decide whether an intent is accepted;
//! postconditions re-check the invariants after the rules engine applied it.

use super::action::{InvalidAction, Move};
use super::invariants::{DuelInvariants, InvariantSet, InvariantViolation};
use super::{MatchState, Phase, Position, TOKENS_PER_SIDE};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), InvalidAction>;

    /// Checks postconditions after applying the action.
    fn post(_before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>
    where
        S: DuelState,
    {
        after.check_invariants()
    }
}

/// States whose invariants can be verified after a transition.
pub trait DuelState {
    /// Runs every invariant.
    fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>>;
}

impl DuelState for MatchState {
    fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        DuelInvariants::check_all(self)
    }
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match has no winner yet.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Rejects any action on a finished match.
    pub fn check(state: &MatchState) -> Result<(), InvalidAction> {
        if state.is_over() {
            Err(InvalidAction::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the match is in the given phase.
pub struct InPhase;

impl InPhase {
    /// Rejects actions belonging to the other phase.
    pub fn check(state: &MatchState, expected: Phase) -> Result<(), InvalidAction> {
        if state.phase() == expected {
            Ok(())
        } else {
            Err(InvalidAction::WrongPhase { expected })
        }
    }
}

/// Precondition: the cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects occupied cells.
    pub fn check(state: &MatchState, pos: Position) -> Result<(), InvalidAction> {
        if state.board().is_empty(pos) {
            Ok(())
        } else {
            Err(InvalidAction::CellOccupied(pos))
        }
    }
}

/// Precondition: the active side still has tokens to place.
pub struct HasPlacementsLeft;

impl HasPlacementsLeft {
    /// Rejects a fourth placement.
    pub fn check(state: &MatchState) -> Result<(), InvalidAction> {
        let side = state.active();
        if state.placed(side) < TOKENS_PER_SIDE {
            Ok(())
        } else {
            Err(InvalidAction::NoPlacementsLeft(side))
        }
    }
}

/// Precondition: the cell holds the active side's token.
pub struct OwnsToken;

impl OwnsToken {
    /// Rejects empty cells and the opponent's tokens.
    pub fn check(state: &MatchState, pos: Position) -> Result<(), InvalidAction> {
        if state.board().holds(pos, state.active_token()) {
            Ok(())
        } else {
            Err(InvalidAction::NotYourToken(pos))
        }
    }
}

/// Precondition: the center lock does not forbid picking this token.
pub struct CenterLockAllows;

impl CenterLockAllows {
    /// While the lock binds the active side, only the center may be chosen.
    pub fn check(state: &MatchState, pos: Position) -> Result<(), InvalidAction> {
        if state.lock_binds(state.active()) && pos != Position::Center {
            Err(InvalidAction::CenterLocked(pos))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the destination is one step from the source.
pub struct StepIsAdjacent;

impl StepIsAdjacent {
    /// Rejects jumps.
    pub fn check(mv: &Move) -> Result<(), InvalidAction> {
        if mv.from.is_adjacent(mv.to) {
            Ok(())
        } else {
            Err(InvalidAction::NotAdjacent {
                from: mv.from,
                to: mv.to,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for placing a token.
///
/// Preconditions:
/// - Match in progress, placement phase
/// - Cell empty
/// - Active side has tokens left
pub struct PlaceContract;

impl Contract<MatchState, Position> for PlaceContract {
    #[instrument(skip(state))]
    fn pre(state: &MatchState, pos: &Position) -> Result<(), InvalidAction> {
        MatchInProgress::check(state)?;
        InPhase::check(state, Phase::Placement)?;
        CellIsEmpty::check(state, *pos)?;
        HasPlacementsLeft::check(state)
    }
}

/// Contract for selecting a token to move.
///
/// Preconditions:
/// - Match in progress, movement phase
/// - Cell holds the active side's token
/// - Center lock permits it
pub struct SelectContract;

impl Contract<MatchState, Position> for SelectContract {
    #[instrument(skip(state))]
    fn pre(state: &MatchState, pos: &Position) -> Result<(), InvalidAction> {
        MatchInProgress::check(state)?;
        InPhase::check(state, Phase::Movement)?;
        OwnsToken::check(state, *pos)?;
        CenterLockAllows::check(state, *pos)
    }
}

/// Contract for moving a token.
///
/// Preconditions:
/// - Everything selecting the source requires
/// - Destination empty and adjacent to the source
pub struct MoveContract;

impl Contract<MatchState, Move> for MoveContract {
    #[instrument(skip(state))]
    fn pre(state: &MatchState, mv: &Move) -> Result<(), InvalidAction> {
        SelectContract::pre(state, &mv.from)?;
        CellIsEmpty::check(state, mv.to)?;
        StepIsAdjacent::check(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Side, Token, TokenPair};

    fn fresh() -> MatchState {
        MatchState::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X)
    }

    #[test]
    fn test_place_on_empty_board_is_legal() {
        assert!(PlaceContract::pre(&fresh(), &Position::Center).is_ok());
    }

    #[test]
    fn test_select_rejected_during_placement() {
        assert_eq!(
            SelectContract::pre(&fresh(), &Position::Center),
            Err(InvalidAction::WrongPhase {
                expected: Phase::Movement
            })
        );
    }

    #[test]
    fn test_step_adjacency() {
        assert!(StepIsAdjacent::check(&Move::new(Position::TopLeft, Position::Center)).is_ok());
        assert!(matches!(
            StepIsAdjacent::check(&Move::new(Position::TopLeft, Position::TopRight)),
            Err(InvalidAction::NotAdjacent { .. })
        ));
    }

    #[test]
    fn test_postcondition_holds_for_fresh_state() {
        let state = fresh();
        assert!(PlaceContract::post(&state, &state).is_ok());
    }
}
