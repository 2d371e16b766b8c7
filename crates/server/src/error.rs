//! Errors surfaced by the recommendation engine.
//!
//! Only collaborator failures are errors. "Nothing to show" is an empty
//! list, never an error.

use accounts::AccountError;
use catalog::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The recipe store failed (fetch, parse or validation)
    #[error("Recipe catalog failure: {0}")]
    Catalog(#[from] CatalogError),

    /// The account store failed
    #[error("Account store failure: {0}")]
    Accounts(#[from] AccountError),

    /// Configuration couldn't be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
