//! # Catalog Crate
//!
//! Recipe and preference domain types, plus everything needed to get a
//! consistent recipe snapshot in memory.
//!
//! ## Main Components
//!
//! - **types**: `Recipe`, `Preferences` and the preference keyword enums
//! - **parser**: JSON catalog documents into `Recipe`s
//! - **index**: `RecipeIndex`, the validated, indexed snapshot
//! - **source**: the `RecipeCatalog` store boundary and its implementations
//! - **snapshot**: `SharedCatalog`, swap-whole-copy refresh
//! - **error**: `CatalogError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{JsonFileCatalog, SharedCatalog};
//!
//! let store = JsonFileCatalog::new("data/recipes.json");
//! let catalog = SharedCatalog::load(&store)?;
//!
//! let snapshot = catalog.snapshot();
//! let bowl = snapshot.get_recipe_by_name("Veggie Bowl");
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod snapshot;
pub mod source;
pub mod types;

pub use error::{CatalogError, Result};
pub use index::RecipeIndex;
pub use snapshot::SharedCatalog;
pub use source::{InMemoryCatalog, JsonFileCatalog, RecipeCatalog};
pub use types::{Cuisine, DietaryRestriction, HealthGoal, Preferences, Recipe, RecipeId};
