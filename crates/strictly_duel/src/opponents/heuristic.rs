//! Static evaluation shared by every search.

use crate::rules::{LINES, winner};
use crate::{Board, Position, Square, Token};

/// Score of a decided position, from the winner's point of view.
pub const WIN_SCORE: i32 = 1000;

const CENTER_BONUS: i32 = 30;
const OPEN_TWO: i32 = 70;
const OPEN_ONE: i32 = 10;

/// How promising `board` looks for `token`.
///
/// +30 for holding the center, and per line with no opposing token:
/// +70 for two own tokens, +10 for one.
pub fn heuristic_score(board: &Board, token: Token) -> i32 {
    let center = if board.holds(Position::Center, token) {
        CENTER_BONUS
    } else {
        0
    };

    let lines: i32 = LINES
        .iter()
        .map(|line| {
            let (own, foreign) = line.iter().fold((0, 0), |(own, foreign), pos| {
                match board.get(*pos) {
                    Square::Occupied(t) if t == token => (own + 1, foreign),
                    Square::Occupied(_) => (own, foreign + 1),
                    Square::Empty => (own, foreign),
                }
            });
            match (own, foreign) {
                (2, 0) => OPEN_TWO,
                (1, 0) => OPEN_ONE,
                _ => 0,
            }
        })
        .sum();

    center + lines
}

/// Evaluates `board` for `me` against `opp`.
///
/// A completed line scores ±[`WIN_SCORE`]; otherwise the heuristic difference.
pub fn evaluate(board: &Board, me: Token, opp: Token) -> i32 {
    match winner(board) {
        Some(token) if token == me => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => heuristic_score(board, me) - heuristic_score(board, opp),
    }
}
