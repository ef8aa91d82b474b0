//! Error types for postdoc.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for postdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, rendering or persisting a collection.
#[derive(Error, Debug)]
pub enum Error {
    /// Required structure is missing or has the wrong shape.
    #[error("malformed document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading the source document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The rendered document could not be persisted.
    #[error("failed to write {}: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
