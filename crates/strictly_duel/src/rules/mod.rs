//! Board rules for the duel.
//!
//! Pure functions over an explicit board, so the opponent search can
//! evaluate hypothetical positions without touching the live match.

pub mod center_lock;
pub mod movement;
pub mod win;

pub use center_lock::{CenterLock, DEFAULT_CENTER_LOCK_THRESHOLD};
pub use movement::legal_moves;
pub use win::{LINES, winner};
