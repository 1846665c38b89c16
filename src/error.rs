//! Error types for the cheeseboard crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cheeseboard crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {action} (expected 0=up, 1=down, 2=left, 3=right)")]
    InvalidAction { action: usize },

    #[error("invalid goal ({row}, {col}): {reason}")]
    InvalidGoal {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("corrupt value table cache at {}: {reason}", path.display())]
    CorruptCache { path: PathBuf, reason: String },

    #[error("no value table cache at {}", path.display())]
    MissingCache { path: PathBuf },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
