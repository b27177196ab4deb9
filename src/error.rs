//! Error types for ingestion, ranking and export.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building a school report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A subject code, order code or other parameter outside its allowed set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Ranking requested on a field that report rows do not carry.
    #[error("unknown report field: {0}")]
    UnknownField(String),

    /// A non-empty score cell that is not a number.
    #[error("invalid number {value:?}")]
    InvalidNumber {
        /// The offending cell contents
        value: String,
    },

    /// Malformed CSV input or failed CSV export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A results file could not be opened or written
    #[error("IO error on {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
