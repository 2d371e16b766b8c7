//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible hard constraints to be applied to recipes.

use catalog::{Preferences, Recipe};

/// A hard pass/fail predicate over one recipe.
///
/// ## Design Note
/// - `Send + Sync` so filters can run inside rayon parallel iterators
/// - Filters never mutate the recipe or the preferences
/// - A filter whose preference is unset must pass every recipe
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `recipe` satisfies this constraint under `prefs`
    fn matches(&self, recipe: &Recipe, prefs: &Preferences) -> bool;
}
