//! Center-lock bookkeeping.
//!
//! After a long run of movement the side holding the center may only move
//! the center token. Moving it lifts the lock and restarts the count.

use super::super::action::Move;
use super::super::position::Position;
use super::super::types::{Board, Token};
use super::movement::legal_moves;
use serde::{Deserialize, Serialize};

/// Movement count at which the center lock engages.
pub const DEFAULT_CENTER_LOCK_THRESHOLD: u32 = 19;

/// Lock state carried from one movement to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CenterLock {
    engaged: bool,
    move_count: u32,
    threshold: u32,
}

impl CenterLock {
    /// A released lock with no moves counted.
    pub fn new(threshold: u32) -> Self {
        Self {
            engaged: false,
            move_count: 0,
            threshold,
        }
    }

    /// Returns true while the lock is engaged.
    pub fn engaged(self) -> bool {
        self.engaged
    }

    /// Moves counted since the match began or the lock last released.
    pub fn move_count(self) -> u32 {
        self.move_count
    }

    /// Count at which the lock engages.
    pub fn threshold(self) -> u32 {
        self.threshold
    }

    /// Lock state once `mv` has been played, given the board after it.
    ///
    /// Moving the center token while engaged releases the lock and is not
    /// counted; any other move counts one.
    pub fn after(self, board: &Board, mv: Move) -> Self {
        let mut next = self;
        if next.engaged && mv.from == Position::Center {
            next.engaged = false;
            next.move_count = 0;
        } else {
            next.move_count += 1;
        }
        if !next.engaged && next.move_count >= next.threshold && !board.is_empty(Position::Center)
        {
            next.engaged = true;
        }
        next
    }

    /// Returns true if the lock restricts `token` to the center.
    pub fn binds(self, board: &Board, token: Token) -> bool {
        self.engaged && board.holds(Position::Center, token)
    }

    /// Legal moves for `token` under the lock.
    pub fn moves(self, board: &Board, token: Token) -> Vec<Move> {
        let moves = legal_moves(board, token);
        if self.binds(board, token) {
            moves
                .into_iter()
                .filter(|mv| mv.from == Position::Center)
                .collect()
        } else {
            moves
        }
    }
}

impl Default for CenterLock {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_LOCK_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    fn board() -> Board {
        Board::new()
            .with_placement(Center, Token::Cat)
            .with_placement(TopLeft, Token::Cat)
            .with_placement(BottomCenter, Token::Cat)
            .with_placement(TopCenter, Token::Dog)
            .with_placement(MiddleLeft, Token::Dog)
            .with_placement(MiddleRight, Token::Dog)
    }

    #[test]
    fn test_engages_at_threshold() {
        let board = board();
        let mv = Move::new(TopCenter, TopRight);
        let lock = CenterLock::new(2).after(&board, mv);
        assert!(!lock.engaged());
        let lock = lock.after(&board, mv);
        assert!(lock.engaged());
        assert_eq!(lock.move_count(), 2);
    }

    #[test]
    fn test_center_move_releases() {
        let board = board();
        let lock = CenterLock {
            engaged: true,
            move_count: 25,
            threshold: 19,
        };
        let released = lock.after(&board, Move::new(Center, TopRight));
        assert!(!released.engaged());
        assert_eq!(released.move_count(), 0);
        let counted = lock.after(&board, Move::new(TopCenter, TopRight));
        assert!(counted.engaged());
        assert_eq!(counted.move_count(), 26);
    }

    #[test]
    fn test_bound_side_moves_only_the_center() {
        let board = board();
        let lock = CenterLock {
            engaged: true,
            move_count: 19,
            threshold: 19,
        };
        let moves = lock.moves(&board, Token::Cat);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.from == Center));
        assert_eq!(lock.moves(&board, Token::Dog), legal_moves(&board, Token::Dog));
    }
}
