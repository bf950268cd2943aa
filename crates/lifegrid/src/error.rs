//! # Engine Error Types
//!
//! Cell access has no error path; these cover configuration, start-up and
//! signalling a loop that has already stopped.

use std::io;
use std::path::PathBuf;

use lifegrid_core::{GridError, SignalClosed};
use thiserror::Error;

/// Errors from loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown/mistyped keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// `initial_pattern` does not name a known preset.
    #[error("invalid initial pattern: {0}")]
    Pattern(#[from] GridError),
}

/// Errors that can occur while building or driving the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Grid construction or seeding failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The simulation thread could not be spawned.
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[source] io::Error),

    /// A frame was signalled after the simulation loop stopped.
    #[error("simulation loop has stopped")]
    Stopped,
}

impl From<SignalClosed> for EngineError {
    fn from(_: SignalClosed) -> Self {
        Self::Stopped
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
