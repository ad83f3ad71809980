//! Session controller: settings, turn ownership, and computer pacing.
//!
//! A session owns one [`Duel`] at a time. Human intents go through the
//! rules engine directly; computer turns are handed out as
//! [`ComputerTurn`] tickets that the presentation waits on and then
//! resolves. Reset and undo bump a generation counter so a ticket issued
//! for an earlier position is discarded instead of applied.

use super::action::{Applied, InvalidAction};
use super::config::DuelConfig;
use super::events::{DuelEvent, transition_events};
use super::game::{Duel, MatchState};
use super::opponents::{self, OpponentStrategy};
use super::phases::Phase;
use super::position::Position;
use super::settings::{FirstPlayer, Mode};
use super::snapshot::Snapshot;
use super::types::TokenPair;
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// A scheduled computer action.
///
/// Valid only for the generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ComputerTurn {
    generation: u64,
    delay: Duration,
}

impl ComputerTurn {
    /// Sleeps for the ticket's pacing delay.
    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// One seat of humans, one seat of humans or the computer, and a match.
#[derive(Debug)]
pub struct DuelSession {
    config: DuelConfig,
    mode: Mode,
    first: FirstPlayer,
    match_mode: Mode,
    duel: Duel,
    strategy: Option<Box<dyn OpponentStrategy>>,
    rng: StdRng,
    generation: u64,
    pending: Option<ComputerTurn>,
    muted: bool,
    event_tx: Option<mpsc::UnboundedSender<DuelEvent>>,
}

impl DuelSession {
    /// Creates a session with a human-vs-human match already running.
    #[instrument(skip(config))]
    pub fn new(config: DuelConfig) -> Self {
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        let duel = Self::fresh_duel(&config, TokenPair::random(&mut rng), FirstPlayer::default());
        Self {
            config,
            mode: Mode::default(),
            first: FirstPlayer::default(),
            match_mode: Mode::default(),
            duel,
            strategy: None,
            rng,
            generation: 1,
            pending: None,
            muted: false,
            event_tx: None,
        }
    }

    /// Sends events to `tx` from now on.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<DuelEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn fresh_duel(config: &DuelConfig, tokens: TokenPair, first: FirstPlayer) -> Duel {
        Duel::with_rules(
            tokens,
            first.side(),
            *config.center_lock_threshold(),
            *config.history_capacity(),
        )
    }

    /// Stores `mode` and `first` and starts a match with them.
    #[instrument(skip(self))]
    pub fn start_match(&mut self, mode: Mode, first: FirstPlayer) {
        self.mode = mode;
        self.first = first;
        self.reset();
    }

    /// Starts a new match with the stored settings.
    #[instrument(skip(self), fields(mode = ?self.mode, first = ?self.first))]
    pub fn reset(&mut self) {
        let tokens = TokenPair::random(&mut self.rng);
        self.duel = Self::fresh_duel(&self.config, tokens, self.first);
        self.match_mode = self.mode;
        self.strategy = self
            .mode
            .difficulty()
            .map(|difficulty| opponents::for_difficulty(difficulty, &self.config));
        self.generation += 1;
        self.pending = None;
        info!(generation = self.generation, "Match started");

        self.emit(DuelEvent::MatchStarted {
            tokens,
            first: self.first.side(),
            mode: self.match_mode,
        });
        self.schedule_computer();
    }

    /// Places the active human's token.
    #[instrument(skip(self))]
    pub fn place_at(&mut self, pos: Position) -> Result<(), InvalidAction> {
        self.human_turn()?;
        self.apply(|duel| duel.place_at(pos))
    }

    /// Selects one of the active human's tokens.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, pos: Position) -> Result<(), InvalidAction> {
        self.human_turn()?;
        self.apply(|duel| duel.select(pos))
    }

    /// Moves the selected token.
    #[instrument(skip(self))]
    pub fn move_selected_to(&mut self, to: Position) -> Result<(), InvalidAction> {
        self.human_turn()?;
        self.apply(|duel| duel.move_selected_to(to))
    }

    /// Picks the action a cell click means in the current phase.
    ///
    /// During movement a click on an own token selects it; any other cell is
    /// a destination for the selected token.
    #[instrument(skip(self))]
    pub fn act_on(&mut self, pos: Position) -> Result<(), InvalidAction> {
        let state = self.duel.state();
        let phase = state.phase();
        let own_token = state.board().holds(pos, state.active_token());
        match phase {
            Phase::Placement => self.place_at(pos),
            Phase::Movement if own_token => self.select_cell(pos),
            Phase::Movement => self.move_selected_to(pos),
        }
    }

    /// Takes back the last action, or against the computer the last human
    /// turn together with the computer's answer.
    ///
    /// Returns false when there is nothing to undo.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn undo(&mut self) -> bool {
        if !self.duel.undo() {
            debug!("History empty");
            return false;
        }
        while self.match_mode.is_computer(self.duel.state().active()) {
            if !self.duel.undo() {
                break;
            }
        }

        self.generation += 1;
        self.pending = None;
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.forget();
        }
        let remaining = self.duel.history_len();
        info!(remaining, "Undone");
        self.emit(DuelEvent::Undone { remaining });
        self.schedule_computer();
        true
    }

    /// Applies the computer's action for `ticket`.
    ///
    /// A ticket from an earlier generation, or one that is no longer
    /// pending, is discarded and `None` returned.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn resolve_computer_turn(&mut self, ticket: ComputerTurn) -> Option<Applied> {
        if ticket.generation != self.generation {
            warn!(ticket = ticket.generation, "Discarding computer turn from an old generation");
            return None;
        }
        if self.pending != Some(ticket) {
            warn!("Discarding computer turn that is not pending");
            return None;
        }
        self.pending = None;

        let Some(strategy) = self.strategy.as_mut() else {
            warn!("No strategy for the computer seat");
            return None;
        };
        let before = self.duel.state().clone();
        let result = match before.phase() {
            Phase::Placement => strategy
                .decide_placement(&before, &mut self.rng)
                .map(|pos| self.duel.place_at(pos)),
            Phase::Movement => strategy
                .decide_movement(&before, &mut self.rng)
                .map(|mv| self.duel.play_move(mv)),
        };

        match result {
            Some(Ok(applied)) => {
                debug!(?applied, "Computer acted");
                for event in transition_events(&before, self.duel.state(), applied) {
                    self.emit(event);
                }
                self.schedule_computer();
                Some(applied)
            }
            Some(Err(e)) => {
                error!(error = %e, "Computer chose an illegal action");
                None
            }
            None => {
                warn!("Computer found nothing to do");
                None
            }
        }
    }

    /// Ticket for the computer turn in flight, if any.
    pub fn pending_computer_turn(&self) -> Option<ComputerTurn> {
        self.pending
    }

    /// Mode used from the next start or reset.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(?mode, "Mode set for next match");
        self.mode = mode;
    }

    /// First player used from the next start or reset.
    pub fn set_first_player(&mut self, first: FirstPlayer) {
        debug!(?first, "First player set for next match");
        self.first = first;
    }

    /// Sets the sound preference. Not part of the match.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Returns the sound preference.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Stored mode for the next match.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Stored first player for the next match.
    pub fn first_player(&self) -> FirstPlayer {
        self.first
    }

    /// Mode the running match was started with.
    pub fn match_mode(&self) -> Mode {
        self.match_mode
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live match state.
    pub fn state(&self) -> &MatchState {
        self.duel.state()
    }

    /// Render-ready view of the session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.duel.state(),
            self.match_mode,
            self.pending.is_some(),
            self.duel.can_undo(),
        )
    }

    fn human_turn(&mut self) -> Result<(), InvalidAction> {
        let state = self.duel.state();
        let check = if state.is_over() {
            Err(InvalidAction::MatchOver)
        } else if self.pending.is_some() {
            Err(InvalidAction::ComputerThinking)
        } else if self.match_mode.is_computer(state.active()) {
            Err(InvalidAction::NotYourTurn(state.active()))
        } else {
            Ok(())
        };
        check.map_err(|e| self.reject(e))
    }

    fn apply<F>(&mut self, action: F) -> Result<(), InvalidAction>
    where
        F: FnOnce(&mut Duel) -> Result<Applied, InvalidAction>,
    {
        let before = self.duel.state().clone();
        let applied = match action(&mut self.duel) {
            Ok(applied) => applied,
            Err(e) => return Err(self.reject(e)),
        };
        for event in transition_events(&before, self.duel.state(), applied) {
            self.emit(event);
        }
        self.schedule_computer();
        Ok(())
    }

    fn reject(&mut self, e: InvalidAction) -> InvalidAction {
        warn!(error = %e, "Action rejected");
        self.emit(DuelEvent::Rejected(e));
        e
    }

    /// Issues a ticket if the computer is now to act.
    fn schedule_computer(&mut self) {
        let state = self.duel.state();
        if state.is_over() || !self.match_mode.is_computer(state.active()) {
            self.pending = None;
            return;
        }
        let jitter = self.rng.gen_range(0..=*self.config.computer_delay_jitter_ms());
        let delay = self.config.computer_delay_min() + Duration::from_millis(jitter);
        let ticket = ComputerTurn {
            generation: self.generation,
            delay,
        };
        debug!(?delay, generation = self.generation, "Computer turn scheduled");
        self.pending = Some(ticket);
        self.emit(DuelEvent::ComputerThinking { delay });
    }

    fn emit(&mut self, event: DuelEvent) {
        let Some(tx) = &self.event_tx else {
            return;
        };
        if tx.send(event).is_err() {
            warn!("Event receiver closed, no further events will be sent");
            self.event_tx = None;
        }
    }
}
