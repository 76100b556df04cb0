// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncgateError {
    /// A sync to this destination is already in flight.
    ///
    /// Raised before any process is spawned; the original sync keeps running.
    #[error("sync already in progress to dir {0}")]
    SyncInProgress(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The external command exited with a non-zero status.
    #[error("command `{program}` exited with status {code}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SyncgateError>;
