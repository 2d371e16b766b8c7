//! Benchmarks for mandatory filtering and ranking
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic catalog so the benchmark needs no data files.

use catalog::{Preferences, Recipe};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::{PreferenceMatcher, RecipeRanker};

const CUISINES: [&str; 6] = ["italian", "mexican", "asian", "american", "mediterranean", "french"];
const DIETS: [&str; 4] = ["vegetarian", "keto", "gluten-free", "vegetarian,gluten-free"];
const GOALS: [&str; 3] = ["low-calorie", "high-calorie", "high-protein"];

fn synthetic_catalog(size: usize) -> Vec<Recipe> {
    (0..size)
        .map(|i| {
            Recipe::new(format!("r{}", i), format!("Recipe {}", i))
                .with_cuisine(CUISINES[i % CUISINES.len()])
                .with_dietary_category(DIETS[i % DIETS.len()])
                .with_health_goals(GOALS[i % GOALS.len()])
                .with_cook_time((i % 90) as u32)
                .with_cost((i % 40) as f64 * 0.75)
                .with_ingredients(["salt", "pepper", if i % 2 == 0 { "tomato" } else { "onion" }])
        })
        .collect()
}

fn preferences() -> Preferences {
    let mut prefs = Preferences::new();
    prefs.vegetarian = true;
    prefs.italian = true;
    prefs.asian = true;
    prefs.max_cook_time = 30;
    prefs.max_budget = 15.0;
    prefs.available_ingredients = vec!["tomato".to_string()];
    prefs
}

fn bench_mandatory_filter(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let prefs = preferences();
    let matcher = PreferenceMatcher::new();

    c.bench_function("mandatory_filter_10k", |b| {
        b.iter(|| {
            let kept = matcher.filter_candidates(black_box(&catalog), black_box(&prefs));
            black_box(kept)
        })
    });
}

fn bench_rank(c: &mut Criterion) {
    let prefs = preferences();
    let ranker = RecipeRanker::with_candidates(synthetic_catalog(10_000));

    c.bench_function("rank_10k", |b| {
        b.iter(|| {
            let ranked = ranker.rank(black_box(&prefs));
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_mandatory_filter, bench_rank);
criterion_main!(benches);
