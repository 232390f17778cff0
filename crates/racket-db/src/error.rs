//! Error types for ledger store operations

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Row not found.
    #[error("Row not found: {0}")]
    NotFound(String),

    /// A guarded write lost a concurrent race; the batch was aborted.
    #[error("Concurrent modification detected, batch aborted")]
    Conflict,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
