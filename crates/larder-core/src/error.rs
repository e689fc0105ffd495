//! Error types for larder-core

use thiserror::Error;

/// Result type alias for larder operations
pub type Result<T> = std::result::Result<T, LarderError>;

/// Main error type for larder operations
#[derive(Error, Debug)]
pub enum LarderError {
    /// Persistence-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A form field did not parse as a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Persistence-specific errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for LarderError {
    fn from(err: rusqlite::Error) -> Self {
        LarderError::Persistence(PersistenceError::Database(err.to_string()))
    }
}
