//! Soft scoring and ranking of filtered candidates.
//!
//! Scores only ever order recipes, they never exclude one. The ranker keeps
//! its own working set so a subset can be re-ranked without running the
//! mandatory filters again.

use catalog::{Preferences, Recipe};
use rayon::prelude::*;

/// Points for each enabled cuisine found in the recipe's cuisine tag
pub const CUISINE_MATCH_POINTS: i64 = 50;
/// Points for staying within the cook-time or budget limit
pub const WITHIN_LIMIT_POINTS: i64 = 10;
const MAX_COOK_TIME_PENALTY: i64 = 5;
const COOK_TIME_PENALTY_STEP: u32 = 5;
const MAX_BUDGET_PENALTY: i64 = 10;
const BUDGET_PENALTY_STEP: f64 = 2.0;

/// A recipe together with its soft score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub score: u32,
}

/// Score a recipe against the non-mandatory preferences.
///
/// ## Formula
/// - +50 per enabled cuisine whose keyword is a substring of the cuisine
///   tag (several cuisines can each match)
/// - max cook time set: +10 if within, else -min((cook - max) / 5, 5)
/// - max budget set: +10 if within, else -min(floor((cost - max) / 2), 10)
/// - never below 0
pub fn score(recipe: &Recipe, prefs: &Preferences) -> u32 {
    let mut total: i64 = 0;

    let cuisine = recipe.cuisine.trim().to_lowercase();
    for wanted in prefs.cuisines() {
        if cuisine.contains(wanted.keyword()) {
            total += CUISINE_MATCH_POINTS;
        }
    }

    if prefs.max_cook_time > 0 {
        if recipe.cook_time <= prefs.max_cook_time {
            total += WITHIN_LIMIT_POINTS;
        } else {
            let over = recipe.cook_time - prefs.max_cook_time;
            total -= i64::from(over / COOK_TIME_PENALTY_STEP).min(MAX_COOK_TIME_PENALTY);
        }
    }

    if prefs.max_budget > 0.0 {
        if recipe.cost <= prefs.max_budget {
            total += WITHIN_LIMIT_POINTS;
        } else {
            let over = recipe.cost - prefs.max_budget;
            let penalty = (over / BUDGET_PENALTY_STEP).floor() as i64;
            total -= penalty.min(MAX_BUDGET_PENALTY);
        }
    }

    total.max(0) as u32
}

/// Scores and orders a working set of candidates, best first.
///
/// ## Usage
/// ```ignore
/// let mut ranker = RecipeRanker::new();
/// ranker.set_candidates(filtered);
/// let ranked = ranker.rank(&prefs);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeRanker {
    candidates: Vec<Recipe>,
}

impl RecipeRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(candidates: Vec<Recipe>) -> Self {
        Self { candidates }
    }

    /// Replace the working set
    pub fn set_candidates(&mut self, candidates: Vec<Recipe>) {
        self.candidates = candidates;
    }

    pub fn candidates(&self) -> &[Recipe] {
        &self.candidates
    }

    /// Score every candidate and sort by score descending.
    ///
    /// The sort is stable: equal scores keep their working-set order.
    pub fn rank_scored(&self, prefs: &Preferences) -> Vec<ScoredRecipe> {
        let mut scored: Vec<ScoredRecipe> = self
            .candidates
            .par_iter()
            .map(|recipe| ScoredRecipe {
                recipe: recipe.clone(),
                score: score(recipe, prefs),
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Ranked candidates without their scores
    pub fn rank(&self, prefs: &Preferences) -> Vec<Recipe> {
        self.rank_scored(prefs)
            .into_iter()
            .map(|scored| scored.recipe)
            .collect()
    }
}

/// Rank `candidates` in one call
pub fn rank(candidates: Vec<Recipe>, prefs: &Preferences) -> Vec<Recipe> {
    RecipeRanker::with_candidates(candidates).rank(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_cuisine_points_stack_on_substring_matches() {
        let mut prefs = Preferences::new();
        prefs.asian = true;
        prefs.american = true;

        let fusion = Recipe::new("r1", "Fusion").with_cuisine(" Asian-American ");
        assert_eq!(score(&fusion, &prefs), 100);

        let plain = Recipe::new("r2", "Plain").with_cuisine("french");
        assert_eq!(score(&plain, &prefs), 0);
    }

    #[test]
    fn test_cook_time_term() {
        let mut prefs = Preferences::new();
        prefs.max_cook_time = 30;
        prefs.italian = true;

        let quick = Recipe::new("r1", "Quick").with_cook_time(30);
        assert_eq!(score(&quick, &prefs), 10);

        // 14 minutes over -> 2 penalty points on top of the 50 cuisine points
        let slow = Recipe::new("r2", "Slow").with_cuisine("italian").with_cook_time(44);
        assert_eq!(score(&slow, &prefs), 48);

        // Penalty caps at 5
        let glacial = Recipe::new("r3", "Glacial").with_cuisine("italian").with_cook_time(300);
        assert_eq!(score(&glacial, &prefs), 45);
    }

    #[test]
    fn test_budget_term() {
        let mut prefs = Preferences::new();
        prefs.max_budget = 10.0;
        prefs.mexican = true;

        let cheap = Recipe::new("r1", "Cheap").with_cost(10.0);
        assert_eq!(score(&cheap, &prefs), 10);

        // 5.5 over -> floor(2.75) = 2
        let pricey = Recipe::new("r2", "Pricey").with_cuisine("mexican").with_cost(15.5);
        assert_eq!(score(&pricey, &prefs), 48);

        // Penalty caps at 10
        let lavish = Recipe::new("r3", "Lavish").with_cuisine("mexican").with_cost(500.0);
        assert_eq!(score(&lavish, &prefs), 40);
    }

    #[test]
    fn test_score_never_negative() {
        let mut prefs = Preferences::new();
        prefs.max_cook_time = 5;
        prefs.max_budget = 1.0;

        let bad = Recipe::new("r1", "Bad").with_cook_time(500).with_cost(900.0);
        assert_eq!(score(&bad, &prefs), 0);
    }

    #[test]
    fn test_unset_limits_add_nothing() {
        let recipe = Recipe::new("r1", "Any").with_cook_time(999).with_cost(999.0);
        assert_eq!(score(&recipe, &Preferences::new()), 0);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let mut prefs = Preferences::new();
        prefs.italian = true;
        prefs.max_cook_time = 20;

        let ranked = rank(
            vec![
                Recipe::new("slow", "Slow").with_cook_time(60),
                Recipe::new("pasta", "Pasta").with_cuisine("italian").with_cook_time(15),
                Recipe::new("quick", "Quick").with_cook_time(10),
            ],
            &prefs,
        );
        assert_eq!(ids(&ranked), vec!["pasta", "quick", "slow"]);
    }

    #[test]
    fn test_rank_is_stable_for_equal_scores() {
        let candidates: Vec<Recipe> = (0..20)
            .map(|i| Recipe::new(format!("r{}", i), format!("Recipe {}", i)))
            .collect();
        let expected: Vec<String> = candidates.iter().map(|r| r.id.clone()).collect();

        let ranked = rank(candidates, &Preferences::new());
        let got: Vec<String> = ranked.into_iter().map(|r| r.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_set_candidates_replaces_working_set() {
        let mut ranker = RecipeRanker::with_candidates(vec![Recipe::new("a", "A")]);
        ranker.set_candidates(vec![Recipe::new("b", "B"), Recipe::new("c", "C")]);

        assert_eq!(ids(ranker.candidates()), vec!["b", "c"]);
        let scored = ranker.rank_scored(&Preferences::new());
        assert!(scored.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_ranking_does_not_touch_inputs() {
        let mut prefs = Preferences::new();
        prefs.asian = true;
        let before = prefs.clone();

        let ranker = RecipeRanker::with_candidates(vec![Recipe::new("r1", "Ramen").with_cuisine("asian")]);
        let snapshot = ranker.candidates().to_vec();
        let _ = ranker.rank(&prefs);

        assert_eq!(prefs, before);
        assert_eq!(ranker.candidates(), snapshot.as_slice());
    }
}
