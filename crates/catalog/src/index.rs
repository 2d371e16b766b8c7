//! RecipeIndex: the in-memory catalog snapshot.
//!
//! Recipes keep the order the store returned them in, since that order is
//! the tie-break for every later ranking pass. Id and name lookups go
//! through HashMap indices into that ordered list.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::Recipe;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Immutable, indexed snapshot of every recipe in the catalog
#[derive(Debug, Default)]
pub struct RecipeIndex {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
    /// Lower-cased name -> position of the first recipe with that name
    by_name: HashMap<String, usize>,
}

impl RecipeIndex {
    /// Creates a new, empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate an index from fetched recipes.
    ///
    /// Fails on empty ids, duplicate ids and negative or non-finite costs.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        let mut by_name = HashMap::with_capacity(recipes.len());

        for (position, recipe) in recipes.iter().enumerate() {
            validate_recipe(recipe)?;
            if by_id.insert(recipe.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
            by_name
                .entry(recipe.name.to_lowercase())
                .or_insert(position);
        }

        Ok(Self {
            recipes,
            by_id,
            by_name,
        })
    }

    /// Load and index a JSON catalog file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let recipes = parser::parse_recipes(path)?;
        let index = Self::from_recipes(recipes)?;
        info!("Indexed {} recipes from {}", index.len(), path.display());
        Ok(index)
    }

    /// All recipes in catalog order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Get a recipe by id
    pub fn get_recipe(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&position| &self.recipes[position])
    }

    /// Get a recipe by name, ignoring case
    pub fn get_recipe_by_name(&self, name: &str) -> Option<&Recipe> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&position| &self.recipes[position])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<()> {
    if recipe.id.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            recipe: recipe.name.clone(),
            field: "id".to_string(),
            value: format!("{:?}", recipe.id),
        });
    }
    if !recipe.cost.is_finite() || recipe.cost < 0.0 {
        return Err(CatalogError::InvalidValue {
            recipe: recipe.name.clone(),
            field: "cost".to_string(),
            value: recipe.cost.to_string(),
        });
    }
    Ok(())
}
