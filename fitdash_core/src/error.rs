//! Error types for the fitdash_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a tabular store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error while reading or writing a table
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV encoding/decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Store could not be reached (or refused the request)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A row did not match the table layout
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Outcome of a failed commit or submission
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// Nothing to commit. A warning for the user, not a failure.
    #[error("no pending entries to commit")]
    EmptyBuffer,

    /// Local validation failed; the store was not contacted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store rejected or failed the write
    #[error("store write failed: {0}")]
    Store(#[from] StoreError),
}

impl CommitError {
    /// True for outcomes that should be shown as warnings rather than errors
    pub fn is_warning(&self) -> bool {
        matches!(self, CommitError::EmptyBuffer | CommitError::InvalidInput(_))
    }
}

/// Core error type for fitdash_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Exercise name not present in the catalog
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Commit or submission failed
    #[error(transparent)]
    Commit(#[from] CommitError),

    /// Store read failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_classification() {
        assert!(CommitError::EmptyBuffer.is_warning());
        assert!(CommitError::InvalidInput("calories".into()).is_warning());
        assert!(!CommitError::Store(StoreError::Unavailable("offline".into())).is_warning());
    }

    #[test]
    fn test_store_cause_is_surfaced() {
        let err = CommitError::from(StoreError::Unavailable("quota exceeded".into()));
        assert_eq!(err.to_string(), "store write failed: store unavailable: quota exceeded");
    }
}
