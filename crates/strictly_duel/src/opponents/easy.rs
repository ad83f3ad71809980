//! Easy tier: random play behind the safety net.

use super::{
    OpponentStrategy, movement_safety_net, placement_safety_net, random_movement,
    random_placement,
};
use crate::{Difficulty, MatchState, Move, Position};
use rand::RngCore;

/// Plays any legal option at random unless a win or a block is on the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyStrategy;

impl OpponentStrategy for EasyStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn decide_placement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Position> {
        placement_safety_net(state).or_else(|| random_placement(state, rng))
    }

    fn decide_movement(&mut self, state: &MatchState, rng: &mut dyn RngCore) -> Option<Move> {
        let candidates = state.legal_moves_for(state.active());
        movement_safety_net(state, &candidates).or_else(|| random_movement(state, rng))
    }
}
