//! Store-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the event store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to create the data directory
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the store file
    #[error("Failed to read store file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the store file
    #[error("Failed to write store file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Store file contents could not be parsed
    #[error("Failed to parse store file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Failed to serialize records
    #[error("Failed to serialize records: {0}")]
    SerializationFailed(String),

    /// Record not found by id
    #[error("Event record not found: {id}")]
    RecordNotFound { id: i64 },
}
