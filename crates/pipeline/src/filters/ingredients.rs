//! Filter to keep recipes the user can cook with what they have.

use crate::traits::Filter;
use catalog::{Preferences, Recipe};

/// Keeps recipes using at least one of the user's available ingredients.
///
/// ## Algorithm
/// 1. No (non-blank) available ingredient -> pass
/// 2. Recipe without ingredients -> fail
/// 3. Pass if any user token is a substring of any recipe ingredient,
///    both sides lower-cased ("tomato" matches "cherry tomatoes")
pub struct IngredientFilter;

impl Filter for IngredientFilter {
    fn name(&self) -> &str {
        "IngredientFilter"
    }

    fn matches(&self, recipe: &Recipe, prefs: &Preferences) -> bool {
        let tokens = prefs.ingredient_tokens();
        if tokens.is_empty() {
            return true;
        }

        recipe.ingredients.iter().any(|ingredient| {
            let ingredient = ingredient.to_lowercase();
            tokens.iter().any(|token| ingredient.contains(token.as_str()))
        })
    }
}
