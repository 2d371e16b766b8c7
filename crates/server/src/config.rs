//! Recommendation engine configuration.

use crate::error::{RecommendError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the final batch is cut from the ranked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOrdering {
    /// Shuffle the ranked list, then take the first `batch_size`.
    /// Ranking only decides membership of the pool, not what is shown first.
    #[default]
    ShuffleThenCap,
    /// Take the `batch_size` best-ranked recipes, in rank order
    RankThenCap,
}

/// Knobs for [`crate::RecommendationOrchestrator`].
///
/// ```text
/// {"batch_size": 3, "ordering": "rank_then_cap", "shuffle_seed": 42}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Maximum recipes per batch
    pub batch_size: usize,
    pub ordering: BatchOrdering,
    /// Fixed seed for the shuffle; `None` seeds from the OS
    pub shuffle_seed: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            ordering: BatchOrdering::default(),
            shuffle_seed: None,
        }
    }
}

impl RecommendationConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_ordering(mut self, ordering: BatchOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RecommendError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| RecommendError::Config(format!("{}: {}", path.display(), e)))
    }
}
