use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] brewiq_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Preferences store could not be opened: {0}")]
    DatabaseInit(String),
    #[error("Could not resolve a data directory; pass --db-path or set BREWIQ_DB_PATH")]
    NoDataDir,
    #[error("Custom method not found for id/prefix/name: {0}")]
    CustomMethodNotFound(String),
    #[error("{0}")]
    AmbiguousCustomMethod(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Timer length must be greater than zero")]
    EmptyTimer,
}
