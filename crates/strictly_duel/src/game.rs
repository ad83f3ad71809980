//! Rules engine: the match state machine.
//!
//! A [`Duel`] owns one [`MatchState`] and its undo [`History`]. Every
//! intent is checked against its contract first; rejected intents leave the
//! state untouched. Accepted placements and movements snapshot the state
//! before mutating it.

use super::action::{Applied, InvalidAction, Move};
use super::contracts::{Contract, MoveContract, PlaceContract, SelectContract};
use super::history::{DEFAULT_HISTORY_CAPACITY, History};
use super::phases::{Outcome, Phase};
use super::position::Position;
use super::rules::{CenterLock, DEFAULT_CENTER_LOCK_THRESHOLD, winner};
use super::types::{Board, Side, Token, TokenPair};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Tokens each side places before movement begins.
pub const TOKENS_PER_SIDE: u8 = 3;

/// Tokens placed so far, per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedCounts {
    x: u8,
    o: u8,
}

impl PlacedCounts {
    /// Tokens `side` has placed.
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::X => self.x,
            Side::O => self.o,
        }
    }

    fn increment(&mut self, side: Side) {
        match side {
            Side::X => self.x += 1,
            Side::O => self.o += 1,
        }
    }

    /// Returns true once both sides placed every token.
    pub fn all_placed(&self) -> bool {
        self.x == TOKENS_PER_SIDE && self.o == TOKENS_PER_SIDE
    }
}

/// Complete state of one match. Cloned wholesale into the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchState {
    board: Board,
    tokens: TokenPair,
    active: Side,
    phase: Phase,
    placed: PlacedCounts,
    selected: Option<Position>,
    lock: CenterLock,
    outcome: Option<Outcome>,
}

impl MatchState {
    /// Creates an empty match with `first` to act.
    pub fn new(tokens: TokenPair, first: Side) -> Self {
        Self {
            board: Board::new(),
            tokens,
            active: first,
            phase: Phase::Placement,
            placed: PlacedCounts::default(),
            selected: None,
            lock: CenterLock::default(),
            outcome: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side-to-token binding.
    pub fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Side to act.
    pub fn active(&self) -> Side {
        self.active
    }

    /// Token of the side to act.
    pub fn active_token(&self) -> Token {
        self.tokens.token(self.active)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Tokens `side` has placed.
    pub fn placed(&self, side: Side) -> u8 {
        self.placed.get(side)
    }

    /// Placed counts for both sides.
    pub fn placed_counts(&self) -> PlacedCounts {
        self.placed
    }

    /// Token selected for movement, if any.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Movement-phase moves since the match started or the lock last released.
    pub fn move_count(&self) -> u32 {
        self.lock.move_count()
    }

    /// Returns true while the center lock is engaged.
    pub fn center_lock(&self) -> bool {
        self.lock.engaged()
    }

    /// Center-lock state, for looking ahead past the current move.
    pub fn lock(&self) -> CenterLock {
        self.lock
    }

    /// The outcome, once there is a winner.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true once the match has a winner.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Side owning the center token, if the center is occupied.
    pub fn center_owner(&self) -> Option<Side> {
        self.board
            .get(Position::Center)
            .token()
            .and_then(|token| self.tokens.side_of(token))
    }

    /// Returns true if the center lock restricts `side` to the center token.
    pub fn lock_binds(&self, side: Side) -> bool {
        self.lock.binds(&self.board, self.tokens.token(side))
    }

    /// Legal movement-phase moves for `side`, honoring the center lock.
    pub fn legal_moves_for(&self, side: Side) -> Vec<Move> {
        self.lock.moves(&self.board, self.tokens.token(side))
    }

    /// Cells the active side may select right now.
    pub fn selectable(&self) -> Vec<Position> {
        if self.is_over() || self.phase != Phase::Movement {
            return Vec::new();
        }
        let own = self.board.positions_of(self.active_token());
        if self.lock_binds(self.active) {
            own.into_iter().filter(|p| *p == Position::Center).collect()
        } else {
            own
        }
    }

    /// Empty neighbors of the selected token.
    pub fn legal_destinations(&self) -> Vec<Position> {
        match self.selected {
            Some(from) => from
                .neighbors()
                .iter()
                .copied()
                .filter(|to| self.board.is_empty(*to))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Match state plus undo history, driven through validated transitions.
#[derive(Debug, Clone)]
pub struct Duel {
    state: MatchState,
    history: History<MatchState>,
}

impl Duel {
    /// Creates a match with default rules.
    #[instrument]
    pub fn new(tokens: TokenPair, first: Side) -> Self {
        Self::with_rules(
            tokens,
            first,
            DEFAULT_CENTER_LOCK_THRESHOLD,
            DEFAULT_HISTORY_CAPACITY,
        )
    }

    /// Creates a match with an explicit lock threshold and undo depth.
    #[instrument]
    pub fn with_rules(
        tokens: TokenPair,
        first: Side,
        center_lock_threshold: u32,
        history_capacity: usize,
    ) -> Self {
        info!(?first, x = %tokens.token(Side::X), o = %tokens.token(Side::O), "New match");
        let mut state = MatchState::new(tokens, first);
        state.lock = CenterLock::new(center_lock_threshold);
        Self {
            state,
            history: History::new(history_capacity),
        }
    }

    /// Returns the live state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Snapshots available for undo.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if there is something to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Places the active side's token on an empty cell.
    #[instrument(skip(self), fields(active = ?self.state.active))]
    pub fn place_at(&mut self, pos: Position) -> Result<Applied, InvalidAction> {
        PlaceContract::pre(&self.state, &pos)?;
        let before = self.state.clone();
        self.history.push(before.clone());

        let side = self.state.active;
        let token = self.state.active_token();
        self.state.board = self.state.board.with_placement(pos, token);
        self.state.placed.increment(side);

        if !self.settle_winner() {
            if self.state.placed.all_placed() {
                info!("All tokens placed, movement phase begins");
                self.state.phase = Phase::Movement;
                self.state.selected = None;
            }
            self.advance_turn();
        }

        self.verify::<PlaceContract, Position>(&before);
        Ok(Applied::Placed { side, at: pos })
    }

    /// Selects one of the active side's tokens for movement.
    ///
    /// Selecting another own token replaces the selection. Selection is not
    /// recorded in the undo history.
    #[instrument(skip(self), fields(active = ?self.state.active))]
    pub fn select(&mut self, pos: Position) -> Result<Applied, InvalidAction> {
        SelectContract::pre(&self.state, &pos)?;
        self.state.selected = Some(pos);
        debug!(%pos, "Token selected");
        Ok(Applied::Selected {
            side: self.state.active,
            at: pos,
        })
    }

    /// Moves the selected token to an empty adjacent cell.
    #[instrument(skip(self), fields(active = ?self.state.active, selected = ?self.state.selected))]
    pub fn move_selected_to(&mut self, to: Position) -> Result<Applied, InvalidAction> {
        if self.state.is_over() {
            return Err(InvalidAction::MatchOver);
        }
        let from = self.state.selected.ok_or(InvalidAction::NoSelection)?;
        self.apply_move(Move::new(from, to))
    }

    /// Selects and moves in one step, as the computer does.
    #[instrument(skip(self), fields(active = ?self.state.active))]
    pub fn play_move(&mut self, mv: Move) -> Result<Applied, InvalidAction> {
        self.apply_move(mv)
    }

    /// Restores the state from before the last placement or movement.
    ///
    /// Returns false, changing nothing, when the history is empty.
    #[instrument(skip(self), fields(depth = self.history.len()))]
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.state = previous;
                debug!(remaining = self.history.len(), "Undo applied");
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    fn apply_move(&mut self, mv: Move) -> Result<Applied, InvalidAction> {
        MoveContract::pre(&self.state, &mv)?;
        let before = self.state.clone();
        self.history.push(before.clone());

        let side = self.state.active;
        self.state.board = self.state.board.with_move(mv);
        self.state.selected = None;
        self.update_center_lock(mv);

        if !self.settle_winner() {
            self.advance_turn();
        }

        self.verify::<MoveContract, Move>(&before);
        Ok(Applied::Moved { side, mv })
    }

    fn update_center_lock(&mut self, mv: Move) {
        let before = self.state.lock;
        let after = before.after(&self.state.board, mv);
        if before.engaged() && !after.engaged() {
            info!(move_count = before.move_count(), "Center token moved, lock released");
        } else if !before.engaged() && after.engaged() {
            info!(
                move_count = after.move_count(),
                owner = ?self.state.center_owner(),
                "Center lock engaged"
            );
        }
        self.state.lock = after;
    }

    /// Records a winner if any line is complete.
    fn settle_winner(&mut self) -> bool {
        let Some(token) = winner(&self.state.board) else {
            return false;
        };
        let Some(side) = self.state.tokens.side_of(token) else {
            return false;
        };
        info!(winner = ?side, %token, "Match won");
        self.state.outcome = Some(Outcome {
            winner: side,
            token,
        });
        self.state.selected = None;
        true
    }

    /// Hands the turn over, passing it straight back if the next side is
    /// boxed in during movement.
    fn advance_turn(&mut self) {
        let next = self.state.active.opponent();
        self.state.active = next;
        if self.state.phase == Phase::Movement && self.state.legal_moves_for(next).is_empty() {
            info!(?next, "No legal move, turn passes");
            self.state.active = next.opponent();
        }
    }

    fn verify<C, A>(&self, before: &MatchState)
    where
        C: Contract<MatchState, A>,
    {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = C::post(before, &self.state) {
            for violation in &violations {
                error!(description = %violation.description, "Invariant violated");
            }
            debug_assert!(false, "Postcondition failed: {violations:?}");
        }
    }
}
