//! Custom error types for logcleaner
//!
//! This module defines the error hierarchy for the cleaning engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for logcleaner operations
#[derive(Error, Debug)]
pub enum CleanerError {
    /// Invalid options, rejected before anything touches the disk
    #[error("Validation error: {0}")]
    Validation(String),

    /// The minimum date does not match the configured layout
    #[error("Date error: '{input}' does not match layout '{layout}'")]
    DateParse { input: String, layout: String },

    /// The source file could not be snapshotted
    #[error("Backup error: {0}")]
    Backup(String),

    /// The snapshot could not be read back
    #[error("Read error: {0}")]
    Read(String),

    /// A single line exceeded the per-line buffer cap
    #[error("Read error: line {line} exceeds the {limit} byte limit")]
    LineTooLong { line: usize, limit: usize },

    /// Writing the trimmed output failed
    #[error("Write error: {0}")]
    Write(String),

    /// The final rename over the target failed
    #[error("Commit error: {0}")]
    Commit(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl CleanerError {
    /// Create a date parse error for the given input and layout
    pub fn date_parse(input: impl Into<String>, layout: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.into(),
            layout: layout.into(),
        }
    }

    /// Check if this error was raised before any file was touched
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DateParse { .. })
    }

    /// Check if this error happens after the backup exists and so requires a rollback
    pub fn triggers_rollback(&self) -> bool {
        matches!(
            self,
            Self::Read(_) | Self::LineTooLong { .. } | Self::Write(_) | Self::Commit(_)
        )
    }
}

impl From<std::io::Error> for CleanerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CleanerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for logcleaner operations
pub type CleanerResult<T> = Result<T, CleanerError>;
