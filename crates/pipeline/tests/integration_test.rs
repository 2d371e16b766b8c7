//! Integration tests for the pipeline.
//!
//! These tests verify that the mandatory filters and the ranker work
//! together on a realistic catalog.

use catalog::{Preferences, Recipe, RecipeIndex};
use pipeline::{PreferenceMatcher, RecipeRanker};

fn create_test_catalog() -> RecipeIndex {
    RecipeIndex::from_recipes(vec![
        Recipe::new("r1", "Veggie Bowl")
            .with_cuisine("american")
            .with_dietary_category("vegetarian")
            .with_health_goals("low-calorie")
            .with_cook_time(20)
            .with_cost(8.0)
            .with_ingredients(["rice", "black beans", "corn"]),
        Recipe::new("r2", "Margherita Pizza")
            .with_cuisine("italian")
            .with_dietary_category("vegetarian")
            .with_health_goals("high-calorie")
            .with_cook_time(45)
            .with_cost(12.0)
            .with_ingredients(["flour", "tomato", "mozzarella"]),
        Recipe::new("r3", "Caprese Salad")
            .with_cuisine("italian")
            .with_dietary_category("vegetarian,gluten-free")
            .with_health_goals("low-calorie")
            .with_cook_time(10)
            .with_cost(9.0)
            .with_ingredients(["tomato", "mozzarella", "basil"]),
        Recipe::new("r4", "Steak and Eggs")
            .with_cuisine("american")
            .with_dietary_category("keto")
            .with_health_goals("high-protein")
            .with_cook_time(25)
            .with_cost(18.0)
            .with_ingredients(["steak", "eggs"]),
        Recipe::new("r5", "Tofu Stir Fry")
            .with_cuisine("asian")
            .with_dietary_category("vegetarian")
            .with_health_goals("high-protein,low-calorie")
            .with_cook_time(30)
            .with_cost(10.0)
            .with_ingredients(["tofu", "broccoli", "soy sauce"]),
    ])
    .unwrap()
}

fn filter_then_rank(index: &RecipeIndex, prefs: &Preferences) -> Vec<String> {
    let matcher = PreferenceMatcher::new();
    let filtered = matcher
        .filter_candidates(index.recipes(), prefs)
        .into_iter()
        .cloned()
        .collect();

    RecipeRanker::with_candidates(filtered)
        .rank(prefs)
        .into_iter()
        .map(|recipe| recipe.id)
        .collect()
}

#[test]
fn test_full_pipeline() {
    let index = create_test_catalog();

    let mut prefs = Preferences::new();
    prefs.vegetarian = true;
    prefs.low_calorie = true;
    prefs.italian = true;
    prefs.max_cook_time = 25;

    // r2 fails the health goal, r4 the dietary restriction.
    // r3: italian (+50) and quick (+10) = 60; r1: quick = 10; r5: 5 over = -1 -> 0
    assert_eq!(filter_then_rank(&index, &prefs), vec!["r3", "r1", "r5"]);
}

#[test]
fn test_ingredients_narrow_the_candidate_set() {
    let index = create_test_catalog();

    let mut prefs = Preferences::new();
    prefs.available_ingredients = vec!["Tomato".to_string()];

    assert_eq!(filter_then_rank(&index, &prefs), vec!["r2", "r3"]);
}

#[test]
fn test_no_preferences_keeps_catalog_order() {
    let index = create_test_catalog();
    let ranked = filter_then_rank(&index, &Preferences::new());
    assert_eq!(ranked, vec!["r1", "r2", "r3", "r4", "r5"]);
}

#[test]
fn test_unsatisfiable_constraints_yield_nothing() {
    let index = create_test_catalog();

    let mut prefs = Preferences::new();
    prefs.keto = true;
    prefs.low_calorie = true;

    assert!(filter_then_rank(&index, &prefs).is_empty());
}

#[test]
fn test_budget_penalty_reorders_without_excluding() {
    let index = create_test_catalog();

    let mut prefs = Preferences::new();
    prefs.american = true;
    prefs.max_budget = 10.0;

    // r1: 50 + 10 = 60; r4: 50 - floor(8 / 2) = 46; r3, r5: 10; r2: 12 - 10 = 2 over -> -1 -> 0
    assert_eq!(
        filter_then_rank(&index, &prefs),
        vec!["r1", "r4", "r3", "r5", "r2"]
    );
}
