//! Minimax with alpha-beta pruning over hypothetical boards.
//!
//! Every function takes the board, remaining depth and bounds explicitly;
//! nothing here touches a live match.

use super::heuristic::{WIN_SCORE, evaluate};
use crate::rules::{CenterLock, winner};
use crate::{Board, Move, Position, TOKENS_PER_SIDE, Token};
use tracing::{debug, instrument};

/// Best root choice and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Chosen action, `None` when there was nothing to choose from.
    pub best: Option<M>,
    /// Value of the chosen action for the searching side.
    pub score: i32,
}

/// Tokens each side still has to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementBudget {
    /// Tokens left for the searching side.
    pub mine: u8,
    /// Tokens left for its opponent.
    pub theirs: u8,
}

impl PlacementBudget {
    /// Budget from the counts each side has already placed.
    pub fn from_placed(mine: u8, theirs: u8) -> Self {
        Self {
            mine: TOKENS_PER_SIDE.saturating_sub(mine),
            theirs: TOKENS_PER_SIDE.saturating_sub(theirs),
        }
    }

    fn left(self, maximizing: bool) -> u8 {
        if maximizing { self.mine } else { self.theirs }
    }

    fn spend(self, maximizing: bool) -> Self {
        if maximizing {
            Self {
                mine: self.mine.saturating_sub(1),
                ..self
            }
        } else {
            Self {
                theirs: self.theirs.saturating_sub(1),
                ..self
            }
        }
    }
}

fn decided(board: &Board, me: Token) -> Option<i32> {
    winner(board).map(|token| if token == me { WIN_SCORE } else { -WIN_SCORE })
}

/// Picks the placement for `me` with the best alpha-beta value.
///
/// The search ends early once both budgets are spent, since placement
/// is over at that point. Ties go to the lowest cell index.
#[instrument(skip(board))]
pub fn search_placement(
    board: &Board,
    me: Token,
    opp: Token,
    budget: PlacementBudget,
    depth: u8,
) -> SearchResult<Position> {
    let mut result = SearchResult {
        best: None,
        score: i32::MIN,
    };
    if budget.mine == 0 {
        return result;
    }

    let mut alpha = i32::MIN;
    for pos in board.empty_positions() {
        let next = board.with_placement(pos, me);
        let score = placement_value(
            &next,
            me,
            opp,
            budget.spend(true),
            depth.saturating_sub(1),
            alpha,
            i32::MAX,
            false,
        );
        if score > result.score {
            result = SearchResult {
                best: Some(pos),
                score,
            };
        }
        alpha = alpha.max(result.score);
    }

    debug!(best = ?result.best, score = result.score, "Placement search finished");
    result
}

#[allow(clippy::too_many_arguments)]
fn placement_value(
    board: &Board,
    me: Token,
    opp: Token,
    budget: PlacementBudget,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> i32 {
    if let Some(score) = decided(board, me) {
        return score;
    }
    if depth == 0 || budget.left(maximizing) == 0 {
        return evaluate(board, me, opp);
    }
    let empties = board.empty_positions();
    if empties.is_empty() {
        return evaluate(board, me, opp);
    }

    let mover = if maximizing { me } else { opp };
    let budget = budget.spend(maximizing);
    if maximizing {
        let mut value = i32::MIN;
        for pos in empties {
            let next = board.with_placement(pos, mover);
            value = value.max(placement_value(
                &next,
                me,
                opp,
                budget,
                depth - 1,
                alpha,
                beta,
                false,
            ));
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = i32::MAX;
        for pos in empties {
            let next = board.with_placement(pos, mover);
            value = value.min(placement_value(
                &next, me, opp, budget, depth - 1, alpha, beta, true,
            ));
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

/// Picks the move for `me` among `candidates` with the best alpha-beta value.
///
/// Replies below the root range over every move the center lock allows at
/// that point. Ties go to the earliest candidate.
#[instrument(skip(board, candidates), fields(candidates = candidates.len()))]
pub fn search_movement(
    board: &Board,
    lock: CenterLock,
    me: Token,
    opp: Token,
    candidates: &[Move],
    depth: u8,
) -> SearchResult<Move> {
    let mut result = SearchResult {
        best: None,
        score: i32::MIN,
    };

    let mut alpha = i32::MIN;
    for mv in candidates {
        let next = board.with_move(*mv);
        let score = movement_value(
            &next,
            lock.after(&next, *mv),
            me,
            opp,
            depth.saturating_sub(1),
            alpha,
            i32::MAX,
            false,
        );
        if score > result.score {
            result = SearchResult {
                best: Some(*mv),
                score,
            };
        }
        alpha = alpha.max(result.score);
    }

    debug!(best = ?result.best, score = result.score, "Movement search finished");
    result
}

fn movement_value(
    board: &Board,
    lock: CenterLock,
    me: Token,
    opp: Token,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> i32 {
    if let Some(score) = decided(board, me) {
        return score;
    }
    if depth == 0 {
        return evaluate(board, me, opp);
    }
    let moves = lock.moves(board, if maximizing { me } else { opp });
    if moves.is_empty() {
        return evaluate(board, me, opp);
    }

    if maximizing {
        let mut value = i32::MIN;
        for mv in moves {
            let next = board.with_move(mv);
            value = value.max(movement_value(
                &next,
                lock.after(&next, mv),
                me,
                opp,
                depth - 1,
                alpha,
                beta,
                false,
            ));
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = i32::MAX;
        for mv in moves {
            let next = board.with_move(mv);
            value = value.min(movement_value(
                &next,
                lock.after(&next, mv),
                me,
                opp,
                depth - 1,
                alpha,
                beta,
                true,
            ));
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}
