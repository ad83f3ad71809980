//! Selection invariant: only the mover's own token can be selected.

use super::super::{MatchState, Phase};
use super::Invariant;

/// Invariant: a selection exists only during movement of a match in
/// progress, and points at one of the active side's tokens.
pub struct SelectionInvariant;

impl Invariant<MatchState> for SelectionInvariant {
    fn holds(state: &MatchState) -> bool {
        match state.selected() {
            None => true,
            Some(pos) => {
                state.phase() == Phase::Movement
                    && !state.is_over()
                    && state.board().holds(pos, state.active_token())
            }
        }
    }

    fn description() -> &'static str {
        "Selection points at the active side's token during movement"
    }
}
