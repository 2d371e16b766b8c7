//! Server crate for the CookIQ recommendation engine.
//!
//! This crate contains the orchestrator that coordinates the recommendation
//! pipeline, and the per-session feedback tracker that sits on top of it.

pub mod config;
pub mod error;
pub mod feedback;
pub mod orchestrator;
pub mod session;

pub use config::{BatchOrdering, RecommendationConfig};
pub use error::{RecommendError, Result};
pub use feedback::{FeedbackTracker, similarity_score};
pub use orchestrator::RecommendationOrchestrator;
pub use session::{SessionPhase, UserSession};
