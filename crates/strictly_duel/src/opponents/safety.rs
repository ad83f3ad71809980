//! Pre-search safety net: take a win, else stop the opponent's.

use crate::rules::{CenterLock, winner};
use crate::{Board, Move, Position, Token};
use tracing::debug;

/// First empty cell that completes a line for `me`.
pub fn winning_placement(board: &Board, me: Token) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|pos| winner(&board.with_placement(*pos, me)) == Some(me))
}

/// First empty cell where `opp` would complete a line.
pub fn blocking_placement(board: &Board, opp: Token) -> Option<Position> {
    winning_placement(board, opp)
}

/// First candidate that completes a line for `me`.
pub fn winning_move(board: &Board, candidates: &[Move], me: Token) -> Option<Move> {
    candidates
        .iter()
        .copied()
        .find(|mv| winner(&board.with_move(*mv)) == Some(me))
}

/// Returns true if, after `mv`, `opp` has a move that wins at once.
///
/// Replies are limited by the lock state that `mv` leaves behind.
pub fn allows_winning_reply(board: &Board, lock: CenterLock, mv: Move, opp: Token) -> bool {
    let next = board.with_move(mv);
    lock.after(&next, mv)
        .moves(&next, opp)
        .into_iter()
        .any(|reply| winner(&next.with_move(reply)) == Some(opp))
}

/// Candidates that deny `opp` an immediate win, when some candidate does not.
///
/// Returns `None` when no candidate is threatened (nothing to block) or when
/// every candidate is.
pub fn safe_moves(
    board: &Board,
    lock: CenterLock,
    candidates: &[Move],
    opp: Token,
) -> Option<Vec<Move>> {
    let (threatened, safe): (Vec<Move>, Vec<Move>) = candidates
        .iter()
        .copied()
        .partition(|mv| allows_winning_reply(board, lock, *mv, opp));

    if threatened.is_empty() {
        return None;
    }
    if safe.is_empty() {
        debug!("Every move allows a winning reply");
        return None;
    }
    Some(safe)
}

/// First of the [`safe_moves`], in candidate order.
pub fn blocking_move(
    board: &Board,
    lock: CenterLock,
    candidates: &[Move],
    opp: Token,
) -> Option<Move> {
    safe_moves(board, lock, candidates, opp).and_then(|safe| safe.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legal_moves;
    use Position::*;

    fn unlocked() -> CenterLock {
        CenterLock::default()
    }

    #[test]
    fn test_winning_placement_found() {
        let board = Board::new()
            .with_placement(TopLeft, Token::Dog)
            .with_placement(TopCenter, Token::Dog);
        assert_eq!(winning_placement(&board, Token::Dog), Some(TopRight));
        assert_eq!(blocking_placement(&board, Token::Dog), Some(TopRight));
        assert_eq!(winning_placement(&board, Token::Cat), None);
    }

    #[test]
    fn test_blocking_move_picks_a_safe_move() {
        // Cat holds TopLeft and TopCenter and can bring MiddleRight up to TopRight.
        let board = Board::new()
            .with_placement(TopLeft, Token::Cat)
            .with_placement(TopCenter, Token::Cat)
            .with_placement(MiddleRight, Token::Cat)
            .with_placement(Center, Token::Dog)
            .with_placement(BottomLeft, Token::Dog)
            .with_placement(BottomRight, Token::Dog);
        let candidates = legal_moves(&board, Token::Dog);
        let mv = blocking_move(&board, unlocked(), &candidates, Token::Cat).unwrap();
        assert_eq!(mv.to, TopRight);
        assert!(!allows_winning_reply(&board, unlocked(), mv, Token::Cat));
        let safe = safe_moves(&board, unlocked(), &candidates, Token::Cat).unwrap();
        assert_eq!(safe.first(), Some(&mv));
        assert!(safe.iter().all(|m| m.to == TopRight));
    }

    #[test]
    fn test_no_threat_means_no_block() {
        let board = Board::new()
            .with_placement(TopLeft, Token::Cat)
            .with_placement(BottomRight, Token::Dog);
        let candidates = legal_moves(&board, Token::Dog);
        assert_eq!(blocking_move(&board, unlocked(), &candidates, Token::Cat), None);
        assert_eq!(safe_moves(&board, unlocked(), &candidates, Token::Cat), None);
    }

    #[test]
    fn test_bound_reply_is_not_a_threat() {
        // Cat: Center, TopLeft, BottomCenter. Dog: TopCenter, MiddleLeft, MiddleRight.
        let board = Board::new()
            .with_placement(Center, Token::Cat)
            .with_placement(TopLeft, Token::Cat)
            .with_placement(BottomCenter, Token::Cat)
            .with_placement(TopCenter, Token::Dog)
            .with_placement(MiddleLeft, Token::Dog)
            .with_placement(MiddleRight, Token::Dog);
        let mv = Move::new(MiddleRight, TopRight);

        // Free to move, Cat answers BottomCenter to BottomRight on the diagonal.
        assert!(allows_winning_reply(&board, unlocked(), mv, Token::Cat));

        // With a threshold of one the lock engages on Dog's move and Cat may
        // only move the center token, which completes nothing.
        let lock = CenterLock::new(1);
        assert!(lock.after(&board.with_move(mv), mv).binds(&board, Token::Cat));
        assert!(!allows_winning_reply(&board, lock, mv, Token::Cat));
    }
}
