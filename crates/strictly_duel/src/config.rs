//! Engine configuration.

use super::rules::DEFAULT_CENTER_LOCK_THRESHOLD;
use super::history::DEFAULT_HISTORY_CAPACITY;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunables for matches, the computer opponent, and its pacing.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Shortest pause before a computer move, in milliseconds.
    #[serde(default = "default_delay_min_ms")]
    computer_delay_min_ms: u64,

    /// Random extra pause on top of the minimum, in milliseconds.
    #[serde(default = "default_delay_jitter_ms")]
    computer_delay_jitter_ms: u64,

    /// Plies searched by the hard opponent during placement.
    #[serde(default = "default_placement_depth")]
    placement_search_depth: u8,

    /// Plies searched by the hard opponent during movement.
    #[serde(default = "default_movement_depth")]
    movement_search_depth: u8,

    /// Snapshots kept for undo.
    #[serde(default = "default_history_capacity")]
    history_capacity: usize,

    /// Movement count that engages the center lock.
    #[serde(default = "default_center_lock_threshold")]
    center_lock_threshold: u32,

    /// Fixed RNG seed for reproducible matches.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_delay_min_ms() -> u64 {
    450
}

fn default_delay_jitter_ms() -> u64 {
    380
}

fn default_placement_depth() -> u8 {
    6
}

fn default_movement_depth() -> u8 {
    4
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_center_lock_threshold() -> u32 {
    DEFAULT_CENTER_LOCK_THRESHOLD
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            computer_delay_min_ms: default_delay_min_ms(),
            computer_delay_jitter_ms: default_delay_jitter_ms(),
            placement_search_depth: default_placement_depth(),
            movement_search_depth: default_movement_depth(),
            history_capacity: default_history_capacity(),
            center_lock_threshold: default_center_lock_threshold(),
            seed: None,
        }
    }
}

impl DuelConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Returns a copy with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy without pacing delays.
    pub fn without_delay(mut self) -> Self {
        self.computer_delay_min_ms = 0;
        self.computer_delay_jitter_ms = 0;
        self
    }

    /// Shortest computer pause.
    pub fn computer_delay_min(&self) -> Duration {
        Duration::from_millis(self.computer_delay_min_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.placement_search_depth == 0 || self.movement_search_depth == 0 {
            return Err(ConfigError::new(
                "Search depths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = DuelConfig::from_toml("").unwrap();
        assert_eq!(config, DuelConfig::default());
        assert_eq!(*config.center_lock_threshold(), 19);
        assert_eq!(*config.history_capacity(), 12);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = DuelConfig::from_toml("movement_search_depth = 0").unwrap_err();
        assert!(err.message.contains("at least 1"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DuelConfig::default().with_seed(42);
        let text = config.to_toml().unwrap();
        assert_eq!(DuelConfig::from_toml(&text).unwrap(), config);
    }
}
