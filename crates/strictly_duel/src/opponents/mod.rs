//! Computer opponents.
//!
//! Every tier runs the same safety net first (take a win, else stop the
//! human's) and only then applies its own policy. In movement Hard narrows
//! the block to a search over the safe moves.

pub mod heuristic;
pub mod safety;
pub mod search;

mod easy;
mod hard;
mod medium;

pub use easy::EasyStrategy;
pub use hard::HardStrategy;
pub use medium::MediumStrategy;

use crate::{Difficulty, DuelConfig, MatchState, Move, Position, Token};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// A computer policy for one seat.
///
/// Strategies only read the state they are given; the session applies
/// whatever they return through the rules engine.
pub trait OpponentStrategy: Send + std::fmt::Debug {
    /// Tier this strategy plays at.
    fn difficulty(&self) -> Difficulty;

    /// Picks an empty cell for the active side.
    fn decide_placement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Position>;

    /// Picks a legal move for the active side.
    fn decide_movement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Move>;

    /// Drops anything remembered about earlier turns.
    fn forget(&mut self) {}
}

/// Builds the strategy for a difficulty.
#[instrument(skip(config))]
pub fn for_difficulty(difficulty: Difficulty, config: &DuelConfig) -> Box<dyn OpponentStrategy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyStrategy),
        Difficulty::Medium => Box::new(MediumStrategy),
        Difficulty::Hard => Box::new(HardStrategy::new(
            *config.placement_search_depth(),
            *config.movement_search_depth(),
        )),
    }
}

/// Own and opposing token of the active side.
fn sides(state: &MatchState) -> (Token, Token) {
    let me = state.active();
    (state.tokens().token(me), state.tokens().token(me.opponent()))
}

/// Winning placement, else blocking placement.
fn placement_safety_net(state: &MatchState) -> Option<Position> {
    let (me, opp) = sides(state);
    let board = state.board();
    if let Some(pos) = safety::winning_placement(board, me) {
        debug!(%pos, "Taking the winning cell");
        return Some(pos);
    }
    let block = safety::blocking_placement(board, opp);
    if let Some(pos) = block {
        debug!(%pos, "Blocking the opponent's line");
    }
    block
}

/// Winning move among every legal move, else a block among `candidates`.
fn movement_safety_net(state: &MatchState, candidates: &[Move]) -> Option<Move> {
    let (me, opp) = sides(state);
    let board = state.board();
    let all = state.legal_moves_for(state.active());
    if let Some(mv) = safety::winning_move(board, &all, me) {
        debug!(%mv, "Taking the winning move");
        return Some(mv);
    }
    let block = safety::blocking_move(board, state.lock(), candidates, opp);
    if let Some(mv) = block {
        debug!(%mv, "Moving out of a losing reply");
    }
    block
}

fn random_placement(state: &MatchState, rng: &mut dyn RngCore) -> Option<Position> {
    state.board().empty_positions().choose(rng).copied()
}

fn random_movement(state: &MatchState, rng: &mut dyn RngCore) -> Option<Move> {
    state.legal_moves_for(state.active()).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Duel, Side, TokenPair};
    use Position::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn duel() -> Duel {
        Duel::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X)
    }

    #[test]
    fn test_factory_matches_difficulty() {
        let config = DuelConfig::default();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(for_difficulty(difficulty, &config).difficulty(), difficulty);
        }
    }

    #[test]
    fn test_safety_net_prefers_win_over_block() {
        let mut duel = duel();
        // X: TopLeft, TopCenter. O: MiddleLeft, Center. X to move.
        for pos in [TopLeft, MiddleLeft, TopCenter, Center] {
            duel.place_at(pos).unwrap();
        }
        // Both sides threaten; O completes its own row first.
        duel.place_at(BottomLeft).unwrap();
        assert_eq!(duel.state().active(), Side::O);
        assert_eq!(placement_safety_net(duel.state()), Some(MiddleRight));
    }

    #[test]
    fn test_random_helpers_stay_legal() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = duel().state().clone();
        for _ in 0..20 {
            let pos = random_placement(&state, &mut rng).unwrap();
            assert!(state.board().is_empty(pos));
        }
        assert_eq!(random_movement(&state, &mut rng), None);
    }
}
