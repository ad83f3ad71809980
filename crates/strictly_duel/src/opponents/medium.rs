//! Medium tier: center first, then corners.

use super::{
    OpponentStrategy, movement_safety_net, placement_safety_net, random_movement,
    random_placement,
};
use crate::{Difficulty, MatchState, Move, Position};
use rand::RngCore;
use rand::seq::SliceRandom;

/// Prefers the center, then a random free corner, when placing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumStrategy;

impl OpponentStrategy for MediumStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn decide_placement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Position> {
        if let Some(pos) = placement_safety_net(state) {
            return Some(pos);
        }
        let board = state.board();
        if board.is_empty(Position::Center) {
            return Some(Position::Center);
        }
        let corners: Vec<Position> = Position::CORNERS
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect();
        corners
            .choose(rng)
            .copied()
            .or_else(|| random_placement(state, rng))
    }

    fn decide_movement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Move> {
        let candidates = state.legal_moves_for(state.active());
        movement_safety_net(state, &candidates).or_else(|| random_movement(state, rng))
    }
}
