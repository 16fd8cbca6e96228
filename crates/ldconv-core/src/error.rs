//! Error types for ldconv core operations.
//!
//! Errors fall into three classes: configuration errors (detected before any
//! backend exists), resource errors (detected while opening a backend) and row
//! errors (a single entry failed to persist). Only row errors are non-fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ldconv operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Core error type for ldconv operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Output configuration rejected before any backend was constructed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input dictionary file does not exist
    #[error("Input file {} doesn't exist", .0.display())]
    InputNotFound(PathBuf),

    /// Output file or store could not be created, opened, keyed or initialized
    #[error("Resource error: {0}")]
    Resource(String),

    /// A single entry could not be persisted
    #[error("Failed to write entry \"{word}\": {message}")]
    Row { word: String, message: String },

    /// Writer operation called in the wrong lifecycle state
    #[error("Invalid writer state: {0}")]
    InvalidState(String),

    /// Entry source failed while producing entries
    #[error("Source error: {0}")]
    Source(String),

    /// I/O error while writing output
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Create a row error for the given word.
    pub fn row(word: &str, message: impl Into<String>) -> Self {
        ConvertError::Row {
            word: word.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error must abort the run.
    ///
    /// Row errors are reported and skipped; everything else stops extraction.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConvertError::Row { .. })
    }
}
