//! The FilterPipeline chains hard-constraint filters.
//!
//! Also home of the PreferenceMatcher, the pipeline preloaded with every
//! mandatory filter a recipe must pass before it can be ranked.

use crate::filters::{DietaryFilter, HealthGoalFilter, IngredientFilter};
use crate::traits::Filter;
use catalog::{Preferences, Recipe};
use rayon::prelude::*;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DietaryFilter)
///     .add_filter(HealthGoalFilter);
///
/// let kept = pipeline.apply(snapshot.recipes(), &prefs);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Whether one recipe passes every filter
    pub fn passes(&self, recipe: &Recipe, prefs: &Preferences) -> bool {
        self.filters.iter().all(|filter| filter.matches(recipe, prefs))
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with references to every input recipe
    /// 2. For each filter in order, keep the recipes it matches (in
    ///    parallel, preserving input order) and log the counts
    /// 3. Return the survivors in their original relative order
    pub fn apply<'a>(&self, candidates: &'a [Recipe], prefs: &Preferences) -> Vec<&'a Recipe> {
        let mut current: Vec<&'a Recipe> = candidates.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = current
                .into_par_iter()
                .filter(|recipe| filter.matches(recipe, prefs))
                .collect();
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether a recipe passes the mandatory filters: dietary
/// restriction, health goal and ingredient availability.
///
/// Filtering has no side effects and does not depend on catalog order
/// beyond preserving it.
pub struct PreferenceMatcher {
    pipeline: FilterPipeline,
}

impl PreferenceMatcher {
    pub fn new() -> Self {
        Self {
            pipeline: FilterPipeline::new()
                .add_filter(DietaryFilter)
                .add_filter(HealthGoalFilter)
                .add_filter(IngredientFilter),
        }
    }

    pub fn passes_mandatory_filters(&self, recipe: &Recipe, prefs: &Preferences) -> bool {
        self.pipeline.passes(recipe, prefs)
    }

    /// The mandatory-filtered candidate set, in catalog order
    pub fn filter_candidates<'a>(&self, catalog: &'a [Recipe], prefs: &Preferences) -> Vec<&'a Recipe> {
        let kept = self.pipeline.apply(catalog, prefs);
        tracing::info!(
            "After mandatory filtering: {} recipes (from {} total)",
            kept.len(),
            catalog.len()
        );
        kept
    }
}

impl Default for PreferenceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless form of [`PreferenceMatcher::passes_mandatory_filters`]
pub fn passes_mandatory_filters(recipe: &Recipe, prefs: &Preferences) -> bool {
    DietaryFilter.matches(recipe, prefs)
        && HealthGoalFilter.matches(recipe, prefs)
        && IngredientFilter.matches(recipe, prefs)
}
