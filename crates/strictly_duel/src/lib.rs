//! Strictly Duel - a two-phase, three-token duel on a 3×3 board
//!
//! Each side places three tokens, then takes turns sliding one token to an
//! empty neighboring cell. Three in a row wins. After a long stretch of
//! movement the player holding the center may be forced to move it.
//!
//! # Architecture
//!
//! - **Rules engine** ([`Duel`]): validated placements and moves over a
//!   [`MatchState`], with contracts, invariants, and a bounded undo history
//! - **Opponents** ([`opponents`]): Easy, Medium and Hard computer play
//!   behind a shared safety net
//! - **Session** ([`DuelSession`]): settings, turn ownership, and paced
//!   computer turns keyed to a generation counter
//!
//! # Example
//!
//! ```
//! use strictly_duel::{DuelConfig, DuelSession, Position};
//!
//! let mut session = DuelSession::new(DuelConfig::default());
//! session.place_at(Position::Center)?;
//! assert_eq!(session.snapshot().placed().get(strictly_duel::Side::X), 1);
//! # Ok::<(), strictly_duel::InvalidAction>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod events;
mod game;
mod history;
mod phases;
mod position;
mod session;
mod settings;
mod snapshot;
mod types;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod opponents;
pub mod rules;

// Crate-level exports - Board and pieces
pub use position::Position;
pub use types::{Board, Side, Square, Token, TokenPair};

// Crate-level exports - Rules engine
pub use action::{Applied, InvalidAction, Move};
pub use game::{Duel, MatchState, PlacedCounts, TOKENS_PER_SIDE};
pub use history::{DEFAULT_HISTORY_CAPACITY, History};
pub use phases::{Outcome, Phase};
pub use rules::{CenterLock, DEFAULT_CENTER_LOCK_THRESHOLD};

// Crate-level exports - Configuration
pub use config::{ConfigError, DuelConfig};

// Crate-level exports - Session management
pub use events::DuelEvent;
pub use session::{ComputerTurn, DuelSession};
pub use settings::{Difficulty, FirstPlayer, Mode};
pub use snapshot::Snapshot;
