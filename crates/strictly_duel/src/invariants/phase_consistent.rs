//! Phase invariant: movement starts exactly when both sides are fully placed.

use super::super::{MatchState, Phase, Side, TOKENS_PER_SIDE};
use super::Invariant;

/// Invariant: the phase agrees with the placed counts.
///
/// - A match in progress is in `Movement` iff both sides placed every token.
/// - A finished match may stop in `Placement` with both sides full, when the
///   last placement won.
/// - The move counter and center lock stay clear during placement.
pub struct PhaseConsistentInvariant;

impl Invariant<MatchState> for PhaseConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        let full = [Side::X, Side::O]
            .into_iter()
            .all(|side| state.placed(side) == TOKENS_PER_SIDE);

        let phase_ok = match (state.phase(), state.is_over()) {
            (Phase::Movement, _) => full,
            (Phase::Placement, false) => !full,
            (Phase::Placement, true) => true,
        };

        let placement_clean = state.phase() == Phase::Movement
            || (state.move_count() == 0 && !state.center_lock());

        phase_ok && placement_clean
    }

    fn description() -> &'static str {
        "Movement begins exactly when both sides placed all tokens"
    }
}
