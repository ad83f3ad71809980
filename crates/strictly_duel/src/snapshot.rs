//! Render-ready view of a session.

use super::game::{MatchState, PlacedCounts};
use super::phases::{Outcome, Phase};
use super::position::Position;
use super::settings::Mode;
use super::types::{Board, Side, Token, TokenPair};
use derive_getters::Getters;
use serde::Serialize;

/// Everything a presentation layer needs to draw the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Snapshot {
    board: Board,
    tokens: TokenPair,
    active: Side,
    active_token: Token,
    phase: Phase,
    selected: Option<Position>,
    legal_destinations: Vec<Position>,
    selectable: Vec<Position>,
    placed: PlacedCounts,
    move_count: u32,
    center_lock: bool,
    outcome: Option<Outcome>,
    computer_thinking: bool,
    mode: Mode,
    can_undo: bool,
}

impl Snapshot {
    /// Captures `state` together with session-level flags.
    pub fn capture(state: &MatchState, mode: Mode, computer_thinking: bool, can_undo: bool) -> Self {
        Self {
            board: *state.board(),
            tokens: *state.tokens(),
            active: state.active(),
            active_token: state.active_token(),
            phase: state.phase(),
            selected: state.selected(),
            legal_destinations: state.legal_destinations(),
            selectable: state.selectable(),
            placed: state.placed_counts(),
            move_count: state.move_count(),
            center_lock: state.center_lock(),
            outcome: state.outcome(),
            computer_thinking,
            mode,
            can_undo,
        }
    }

    /// One-line status for the turn.
    pub fn status(&self) -> String {
        if let Some(outcome) = self.outcome {
            return format!("{outcome}");
        }
        if self.computer_thinking {
            return "Computer is thinking...".to_string();
        }
        let side = self.active;
        let token = self.active_token;
        match self.phase {
            Phase::Placement => format!(
                "{side} ({token}) to place, {} of 3 down",
                self.placed.get(side)
            ),
            Phase::Movement if self.center_lock && self.selectable == [Position::Center] => {
                format!("{side} ({token}) must move the center token")
            }
            Phase::Movement => match self.selected {
                Some(from) => format!("{side} ({token}) moving from {from}"),
                None => format!("{side} ({token}) to select a token"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_snapshot() {
        let tokens = TokenPair::new(Token::Star, Token::Heart).unwrap();
        let state = MatchState::new(tokens, Side::X);
        let snapshot = Snapshot::capture(&state, Mode::HumanVsHuman, false, false);
        assert_eq!(*snapshot.phase(), Phase::Placement);
        assert!(snapshot.selectable().is_empty());
        assert_eq!(snapshot.status(), "X (Star) to place, 0 of 3 down");
    }

    #[test]
    fn test_snapshot_serializes() {
        let tokens = TokenPair::new(Token::Star, Token::Heart).unwrap();
        let state = MatchState::new(tokens, Side::O);
        let snapshot = Snapshot::capture(&state, Mode::HumanVsHuman, true, false);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["computer_thinking"], true);
        assert_eq!(json["active"], "O");
    }
}
