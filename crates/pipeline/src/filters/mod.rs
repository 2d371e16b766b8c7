//! Filter implementations for the mandatory-filter pipeline.
//!
//! Each hard constraint lives in its own filter so they can be composed
//! into a FilterPipeline and logged individually.

pub mod dietary;
pub mod health_goal;
pub mod ingredients;

// Re-export for convenience
pub use dietary::DietaryFilter;
pub use health_goal::HealthGoalFilter;
pub use ingredients::IngredientFilter;
