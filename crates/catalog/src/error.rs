//! Error types for the catalog crate.
//!
//! Loading a catalog can fail because the backing store is missing,
//! unreadable, or holds documents that break catalog invariants. An empty
//! catalog is not an error.

use thiserror::Error;

/// Errors that can occur while fetching or validating recipes
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog document couldn't be parsed
    #[error("Parse error in {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },

    /// A recipe field had an invalid value
    #[error("Invalid value for {field} in recipe '{recipe}': {value}")]
    InvalidValue {
        recipe: String,
        field: String,
        value: String,
    },

    /// Two recipes share the same identifier
    #[error("Duplicate recipe id: {0}")]
    DuplicateRecipe(String),

    /// The recipe store could not be reached
    #[error("Recipe store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
