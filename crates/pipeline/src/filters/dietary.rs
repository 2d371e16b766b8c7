//! Filter to enforce the user's dietary restrictions.
//!
//! Dietary restrictions are mandatory: once the user picks any, a recipe
//! has to carry at least one of them to be considered at all.

use crate::traits::Filter;
use catalog::{Preferences, Recipe};

/// Keeps recipes whose dietary category mentions an enabled restriction.
///
/// ## Algorithm
/// 1. No restriction enabled -> pass
/// 2. Lower-case the recipe's dietary category
/// 3. Pass if it contains the keyword of any enabled restriction
pub struct DietaryFilter;

impl Filter for DietaryFilter {
    fn name(&self) -> &str {
        "DietaryFilter"
    }

    fn matches(&self, recipe: &Recipe, prefs: &Preferences) -> bool {
        let restrictions = prefs.dietary_restrictions();
        if restrictions.is_empty() {
            return true;
        }

        let category = recipe.dietary_category.to_lowercase();
        restrictions
            .iter()
            .any(|restriction| category.contains(restriction.keyword()))
    }
}
