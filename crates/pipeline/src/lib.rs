//! Pipeline for filtering and ranking recipe candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for the mandatory constraints
//! - FilterPipeline for composing filters, and PreferenceMatcher, the
//!   pipeline preloaded with every mandatory filter
//! - RecipeRanker for soft scoring
//!
//! ## Architecture
//! The pipeline processes a catalog snapshot in stages:
//! 1. Mandatory filters remove recipes that break a dietary restriction,
//!    a health goal or the available-ingredient constraint
//! 2. The ranker scores the survivors on cuisine, cook time and budget
//!    and sorts them, best first
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{PreferenceMatcher, RecipeRanker};
//!
//! let matcher = PreferenceMatcher::new();
//! let filtered = matcher.filter_candidates(snapshot.recipes(), &prefs);
//!
//! let ranker = RecipeRanker::with_candidates(filtered.into_iter().cloned().collect());
//! let ranked = ranker.rank(&prefs);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod ranker;
pub mod traits;

// Re-export main types
pub use filter_pipeline::{FilterPipeline, PreferenceMatcher, passes_mandatory_filters};
pub use ranker::{RecipeRanker, ScoredRecipe, rank, score};
pub use traits::Filter;
