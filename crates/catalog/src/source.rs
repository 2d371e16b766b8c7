//! Recipe store boundary.
//!
//! The engine never owns recipe persistence. It only asks a store for the
//! full catalog or for a single recipe by name.

use crate::error::Result;
use crate::parser;
use crate::types::Recipe;
use std::path::PathBuf;

/// Read-only access to a recipe store.
///
/// `Send + Sync` so one store can back many concurrent sessions.
pub trait RecipeCatalog: Send + Sync {
    /// Fetch every recipe, in store order
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>>;

    /// Fetch one recipe by name, ignoring case
    fn fetch_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        let wanted = name.to_lowercase();
        Ok(self
            .fetch_all_recipes()?
            .into_iter()
            .find(|recipe| recipe.name.to_lowercase() == wanted))
    }
}

/// Recipe store backed by a fixed list, mostly for tests and demos
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    recipes: Vec<Recipe>,
}

impl InMemoryCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeCatalog for InMemoryCatalog {
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self.recipes.clone())
    }
}

/// Recipe store backed by a JSON catalog file, re-read on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecipeCatalog for JsonFileCatalog {
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        parser::parse_recipes(&self.path)
    }
}
