//! Hard tier: alpha-beta search in both phases.
//!
//! In movement it takes a win when one exists; otherwise, if some move
//! hands the human a win, it searches only the moves that do not.

use super::search::{PlacementBudget, search_movement, search_placement};
use super::{OpponentStrategy, placement_safety_net, safety, sides};
use crate::{Difficulty, MatchState, Move, Position};
use rand::RngCore;
use tracing::{debug, instrument};

/// Searches placements and moves, and avoids undoing its own last move.
#[derive(Debug, Clone)]
pub struct HardStrategy {
    placement_depth: u8,
    movement_depth: u8,
    last_move: Option<Move>,
}

impl HardStrategy {
    /// Creates a strategy searching to the given depths.
    pub fn new(placement_depth: u8, movement_depth: u8) -> Self {
        Self {
            placement_depth,
            movement_depth,
            last_move: None,
        }
    }

    /// The move this strategy played last, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Legal moves minus the reversal of the last one, unless nothing else is left.
    fn candidates(&self, state: &MatchState) -> Vec<Move> {
        let all = state.legal_moves_for(state.active());
        let Some(reverse) = self.last_move.map(Move::reversed) else {
            return all;
        };
        let filtered: Vec<Move> = all.iter().copied().filter(|mv| *mv != reverse).collect();
        if filtered.is_empty() {
            debug!(%reverse, "Only the reversal is left");
            all
        } else {
            filtered
        }
    }
}

impl OpponentStrategy for HardStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    #[instrument(skip(self, state, _rng), fields(depth = self.placement_depth))]
    fn decide_placement(&mut self, state: &MatchState, _rng: &mut dyn RngCore) -> Option<Position> {
        if let Some(pos) = placement_safety_net(state) {
            return Some(pos);
        }
        let (me, opp) = sides(state);
        let side = state.active();
        let budget = PlacementBudget::from_placed(state.placed(side), state.placed(side.opponent()));
        search_placement(state.board(), me, opp, budget, self.placement_depth).best
    }

    #[instrument(skip(self, state, _rng), fields(depth = self.movement_depth))]
    fn decide_movement(&mut self, state: &MatchState, _rng: &mut dyn RngCore) -> Option<Move> {
        let (me, opp) = sides(state);
        let board = state.board();
        let all = state.legal_moves_for(state.active());
        let choice = match safety::winning_move(board, &all, me) {
            Some(mv) => {
                debug!(%mv, "Taking the winning move");
                Some(mv)
            }
            None => {
                let candidates = self.candidates(state);
                let pool = match safety::safe_moves(board, state.lock(), &candidates, opp) {
                    Some(safe) => {
                        debug!(safe = safe.len(), "Searching moves that deny a winning reply");
                        safe
                    }
                    None => candidates,
                };
                search_movement(board, state.lock(), me, opp, &pool, self.movement_depth).best
            }
        };
        if choice.is_some() {
            self.last_move = choice;
        }
        choice
    }

    fn forget(&mut self) {
        self.last_move = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Duel, Side, Token, TokenPair};
    use Position::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn movement_duel() -> Duel {
        // X: TopLeft, MiddleRight, BottomCenter. O: TopCenter, MiddleLeft, BottomRight.
        let mut duel = Duel::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X);
        for pos in [TopLeft, TopCenter, MiddleRight, MiddleLeft, BottomCenter, BottomRight] {
            duel.place_at(pos).unwrap();
        }
        duel
    }

    #[test]
    fn test_reversal_is_filtered() {
        let mut duel = movement_duel();
        duel.play_move(Move::new(MiddleRight, Center)).unwrap();
        let mut hard = HardStrategy::new(6, 4);
        hard.last_move = Some(Move::new(TopRight, TopCenter));
        let candidates = hard.candidates(duel.state());
        assert!(!candidates.contains(&Move::new(TopCenter, TopRight)));
        assert!(candidates.contains(&Move::new(MiddleLeft, BottomLeft)));
    }

    #[test]
    fn test_movement_choice_is_legal_and_remembered() {
        let mut duel = movement_duel();
        duel.play_move(Move::new(TopLeft, Center)).unwrap();
        let mut hard = HardStrategy::new(6, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mv = hard.decide_movement(duel.state(), &mut rng).unwrap();
        assert!(duel.state().legal_moves_for(Side::O).contains(&mv));
        assert_eq!(hard.last_move(), Some(mv));
        hard.forget();
        assert_eq!(hard.last_move(), None);
    }

    #[test]
    fn test_win_ignores_reversal_filter() {
        // X: TopLeft, TopCenter, BottomLeft. O: MiddleLeft, Center, BottomRight.
        let mut duel = Duel::new(TokenPair::new(Token::Cat, Token::Dog).unwrap(), Side::X);
        for pos in [TopLeft, MiddleLeft, TopCenter, Center, BottomLeft, BottomRight] {
            duel.place_at(pos).unwrap();
        }
        duel.play_move(Move::new(TopCenter, TopRight)).unwrap();

        let mut hard = HardStrategy::new(6, 4);
        hard.last_move = Some(Move::new(MiddleRight, BottomRight));
        let mut rng = StdRng::seed_from_u64(5);
        let mv = hard.decide_movement(duel.state(), &mut rng).unwrap();
        assert_eq!(mv, Move::new(BottomRight, MiddleRight));
    }
}
