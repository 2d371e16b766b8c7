//! Filter to enforce the user's health goals.

use crate::traits::Filter;
use catalog::{Preferences, Recipe};

/// Keeps recipes whose health-goal tag mentions an enabled goal.
///
/// Same shape as [`super::DietaryFilter`]: no goal enabled passes
/// everything, otherwise one case-insensitive substring hit is enough.
pub struct HealthGoalFilter;

impl Filter for HealthGoalFilter {
    fn name(&self) -> &str {
        "HealthGoalFilter"
    }

    fn matches(&self, recipe: &Recipe, prefs: &Preferences) -> bool {
        let goals = prefs.health_goals();
        if goals.is_empty() {
            return true;
        }

        let tag = recipe.health_goals.to_lowercase();
        goals.iter().any(|goal| tag.contains(goal.keyword()))
    }
}
