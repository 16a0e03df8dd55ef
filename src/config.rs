//! # Run configuration.
//!
//! [`Config`] holds everything a run needs: the shared text, how many bytes
//! each turn prints, how many workers rotate the turn, the pause between
//! turns and an optional bound on the number of turns.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use baton::Config;
//!
//! let mut cfg = Config::new("abcdef");
//! cfg.chars_per_turn = 3;
//! cfg.workers = 2;
//! cfg.pacing = Duration::ZERO;
//!
//! assert!(cfg.validate().is_ok());
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;

/// Pause between turns used when none is configured.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Configuration of one printing run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Text shared read-only by all workers. Must not be empty.
    pub text: Arc<[u8]>,
    /// Bytes printed per turn. Zero is allowed and prints empty slices.
    pub chars_per_turn: usize,
    /// Number of workers. Must be at least one.
    pub workers: usize,
    /// Pause taken by the dispatcher after each completed turn.
    pub pacing: Duration,
    /// Stop after this many turns (`None` = run until terminated).
    pub max_turns: Option<u64>,
}

impl Config {
    /// Creates a configuration for `text` with one worker printing one byte
    /// per turn.
    pub fn new(text: impl AsRef<[u8]>) -> Self {
        Self {
            text: Arc::from(text.as_ref()),
            chars_per_turn: 1,
            workers: 1,
            pacing: DEFAULT_PACING,
            max_turns: None,
        }
    }

    /// Checks the invariants the coordination loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.is_empty() {
            return Err(ConfigError::EmptyText);
        }

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        Ok(())
    }
}
