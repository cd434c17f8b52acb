//! Errors for the refresh loop.
//!
//! There is deliberately no retry or recovery anywhere: a missing secret
//! file or an unwritable destination is an operator error that should crash
//! the process and surface in the supervisor, not loop silently.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the refresh loop.
#[derive(Debug, Error)]
pub enum RefresherError {
    /// A secret file was missing or unreadable.
    #[error("failed to read secret file {}: {source}", path.display())]
    SourceRead {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The destination config could not be written.
    #[error("failed to write registry auth config {}: {source}", path.display())]
    Write {
        /// Destination path that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The auth config document could not be serialized.
    #[error("failed to serialize registry auth config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result alias for refresh loop operations.
pub type Result<T> = std::result::Result<T, RefresherError>;
