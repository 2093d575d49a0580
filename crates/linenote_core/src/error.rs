//! Error types for the editing engine.
use thiserror::Error;

/// Top-level engine error type.
///
/// Parsing, caret mapping and empty-history navigation never produce one of
/// these; they degrade, return `None`, or report an unchanged outcome.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    SnapshotEncoding(#[from] serde_json::Error),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
