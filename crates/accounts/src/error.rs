//! Error types for the accounts crate.

use thiserror::Error;

/// Errors raised by an account store
#[derive(Error, Debug)]
pub enum AccountError {
    /// No account exists for the username
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The backing store could not be reached
    #[error("Account store unavailable: {0}")]
    Unavailable(String),

    /// I/O error while reading or writing the account file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Account data or preferences couldn't be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AccountError>;
