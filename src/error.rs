//! Error types.
//!
//! Every failure is a startup failure: it is reported before the first turn
//! is granted. Once the coordination loop is running nothing returns an
//! error; sink write failures are logged and the turn is still released.

use std::io;
use thiserror::Error;

/// Invalid run configuration.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The text is empty, so there is nothing to index into.
    #[error("text to print must not be empty")]
    EmptyText,

    /// No workers were requested; the turn rotation needs at least one.
    #[error("at least one worker thread is required")]
    NoWorkers,
}

/// Errors produced while starting a run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The OS refused to create a worker thread. Workers already started
    /// have been stopped and joined.
    #[error("failed to spawn worker {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::Config(ConfigError::EmptyText) => "config_empty_text",
            Error::Config(ConfigError::NoWorkers) => "config_no_workers",
            Error::Spawn { .. } => "spawn_failed",
        }
    }
}
