//! Error types for impress-dedup

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for dedup operations
pub type Result<T> = std::result::Result<T, DedupError>;

/// Main error type for dedup operations
#[derive(Error, Debug)]
pub enum DedupError {
    /// A threshold, command or argument the caller should have rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The similarity scorer broke its contract
    #[error("Scorer error: {0}")]
    Scorer(String),

    /// Malformed partition pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading or writing a list failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A named result set was requested that the session does not hold
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DedupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DedupError::Io {
            path: path.into(),
            source,
        }
    }
}
