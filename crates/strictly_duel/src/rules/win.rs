//! Win detection.

use super::super::position::Position::{self, *};
use super::super::types::{Board, Square, Token};

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [TopLeft, TopCenter, TopRight],
    [MiddleLeft, Center, MiddleRight],
    [BottomLeft, BottomCenter, BottomRight],
    // Columns
    [TopLeft, MiddleLeft, BottomLeft],
    [TopCenter, Center, BottomCenter],
    [TopRight, MiddleRight, BottomRight],
    // Diagonals
    [TopLeft, Center, BottomRight],
    [TopRight, Center, BottomLeft],
];

/// Returns the token filling any line, or `None`.
pub fn winner(board: &Board) -> Option<Token> {
    LINES.iter().find_map(|&[a, b, c]| match board.get(a) {
        Square::Occupied(token) if board.holds(b, token) && board.holds(c, token) => Some(token),
        _ => None,
    })
}
