//! Error types for brewiq-core

use thiserror::Error;

/// Result type alias using brewiq-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in brewiq-core operations
///
/// Invalid user input never shows up here: calculations return `None` and
/// preference edits report [`crate::services::Outcome::Rejected`].
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
