//! Movement generation.

use super::super::action::Move;
use super::super::position::Position;
use super::super::types::{Board, Token};

/// Every relocation of a `token` to an empty neighboring cell.
///
/// Ordered by source cell, then by the source's adjacency order.
pub fn legal_moves(board: &Board, token: Token) -> Vec<Move> {
    Position::ALL
        .into_iter()
        .filter(|from| board.holds(*from, token))
        .flat_map(|from| {
            from.neighbors()
                .iter()
                .filter(|to| board.is_empty(**to))
                .map(move |&to| Move::new(from, to))
        })
        .collect()
}
