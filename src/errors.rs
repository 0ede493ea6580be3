//! Typed error definitions for file_renamer.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenamerError {
    #[error("Root path is missing or not a directory: {0}")]
    RootInvalid(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Naming store error: {0}")]
    Store(String),

    #[error("No free name found for {path} after {attempts} attempts")]
    CollisionsExhausted { path: PathBuf, attempts: u32 },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl RenamerError {
    /// Stable numeric code for structured logs and exit diagnostics.
    pub fn code(&self) -> u16 {
        match self {
            RenamerError::RootInvalid(_) => 10,
            RenamerError::InvalidConfig(_) => 11,
            RenamerError::Store(_) => 20,
            RenamerError::CollisionsExhausted { .. } => 30,
            RenamerError::Interrupted => 130,
        }
    }
}

impl From<rusqlite::Error> for RenamerError {
    fn from(e: rusqlite::Error) -> Self {
        RenamerError::Store(e.to_string())
    }
}
