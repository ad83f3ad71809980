//! Token count invariant: the board holds exactly what each side placed.

use super::super::{MatchState, Side};
use super::Invariant;

/// Invariant: each side has as many tokens on the board as it has placed.
///
/// Movement relocates tokens; nothing ever removes or duplicates one.
pub struct TokenCountInvariant;

impl Invariant<MatchState> for TokenCountInvariant {
    fn holds(state: &MatchState) -> bool {
        [Side::X, Side::O].into_iter().all(|side| {
            let on_board = state.board().count(state.tokens().token(side));
            on_board == usize::from(state.placed(side))
        })
    }

    fn description() -> &'static str {
        "Board token counts match placed counts"
    }
}
