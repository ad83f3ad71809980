//! Notifications a session emits for its presentation layer.

use super::action::{Applied, InvalidAction, Move};
use super::game::MatchState;
use super::phases::{Outcome, Phase};
use super::position::Position;
use super::settings::Mode;
use super::types::{Side, TokenPair};
use std::time::Duration;

/// Something the presentation may want to show or play a sound for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuelEvent {
    /// A new match began.
    MatchStarted {
        /// Tokens drawn for both seats.
        tokens: TokenPair,
        /// Seat taking the first turn.
        first: Side,
        /// Who plays seat `O`.
        mode: Mode,
    },
    /// A token was placed.
    Placed {
        /// Placing side.
        side: Side,
        /// Target cell.
        at: Position,
    },
    /// A token was picked up for movement.
    Selected {
        /// Selecting side.
        side: Side,
        /// Selected cell.
        at: Position,
    },
    /// A token moved one step.
    Moved {
        /// Moving side.
        side: Side,
        /// The step taken.
        mv: Move,
    },
    /// All six tokens are down.
    MovementBegan,
    /// The center owner may only move the center token.
    CenterLockEngaged {
        /// Side bound by the lock.
        owner: Side,
    },
    /// The center token moved and the lock lifted.
    CenterLockReleased,
    /// A side had no legal move and lost its turn.
    TurnPassed {
        /// Side that was skipped.
        side: Side,
    },
    /// Someone completed a line.
    GameOver(Outcome),
    /// An action was refused.
    Rejected(InvalidAction),
    /// The last action (or the last human turn) was taken back.
    Undone {
        /// Snapshots still available.
        remaining: usize,
    },
    /// The computer will act after a pause.
    ComputerThinking {
        /// Length of the pause.
        delay: Duration,
    },
}

/// Events describing the change from `before` to `after`.
pub fn transition_events(before: &MatchState, after: &MatchState, applied: Applied) -> Vec<DuelEvent> {
    let mut events = vec![match applied {
        Applied::Placed { side, at } => DuelEvent::Placed { side, at },
        Applied::Selected { side, at } => DuelEvent::Selected { side, at },
        Applied::Moved { side, mv } => DuelEvent::Moved { side, mv },
    }];

    if before.phase() == Phase::Placement && after.phase() == Phase::Movement {
        events.push(DuelEvent::MovementBegan);
    }

    match (before.center_lock(), after.center_lock()) {
        (false, true) => {
            if let Some(owner) = after.center_owner() {
                events.push(DuelEvent::CenterLockEngaged { owner });
            }
        }
        (true, false) => events.push(DuelEvent::CenterLockReleased),
        _ => {}
    }

    if let Some(outcome) = after.outcome() {
        if before.outcome().is_none() {
            events.push(DuelEvent::GameOver(outcome));
        }
    } else if !matches!(applied, Applied::Selected { .. }) && after.active() == before.active() {
        events.push(DuelEvent::TurnPassed {
            side: before.active().opponent(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Duel, Token};
    use Position::*;

    #[test]
    fn test_sixth_placement_starts_movement() {
        let mut duel = Duel::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X);
        for pos in [TopLeft, TopCenter, MiddleRight, MiddleLeft, BottomCenter] {
            duel.place_at(pos).unwrap();
        }
        let before = duel.state().clone();
        let applied = duel.place_at(BottomRight).unwrap();
        let events = transition_events(&before, duel.state(), applied);
        assert_eq!(
            events,
            vec![
                DuelEvent::Placed {
                    side: Side::O,
                    at: BottomRight
                },
                DuelEvent::MovementBegan,
            ]
        );
    }

    #[test]
    fn test_winning_move_reports_game_over() {
        let mut duel = Duel::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X);
        for pos in [TopLeft, MiddleLeft, TopCenter, Center] {
            duel.place_at(pos).unwrap();
        }
        let before = duel.state().clone();
        let applied = duel.place_at(TopRight).unwrap();
        let events = transition_events(&before, duel.state(), applied);
        assert!(matches!(events.last(), Some(DuelEvent::GameOver(outcome)) if outcome.winner == Side::X));
    }
}
