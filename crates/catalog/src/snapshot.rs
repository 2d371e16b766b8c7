//! Shared catalog snapshot with whole-copy refresh.
//!
//! Readers clone the current `Arc<RecipeIndex>` at the start of an operation
//! and keep working against it even if a refresh lands meanwhile. A refresh
//! builds a complete new index first and only then swaps the pointer, so no
//! reader ever sees a partially loaded catalog.

use crate::error::Result;
use crate::index::RecipeIndex;
use crate::source::RecipeCatalog;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<RecipeIndex>>,
}

impl SharedCatalog {
    /// An empty catalog; every recommendation against it is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_index(index: RecipeIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Fetch everything from `source` and build the first snapshot
    pub fn load(source: &dyn RecipeCatalog) -> Result<Self> {
        let index = RecipeIndex::from_recipes(source.fetch_all_recipes()?)?;
        info!("Loaded {} recipes into catalog snapshot", index.len());
        Ok(Self::from_index(index))
    }

    /// The snapshot to use for one operation
    pub fn snapshot(&self) -> Arc<RecipeIndex> {
        Arc::clone(&self.current.read())
    }

    /// Re-fetch from `source` and swap in the new snapshot.
    ///
    /// On failure the previous snapshot stays in place. Returns the new
    /// recipe count.
    pub fn refresh(&self, source: &dyn RecipeCatalog) -> Result<usize> {
        let index = Arc::new(RecipeIndex::from_recipes(source.fetch_all_recipes()?)?);
        let count = index.len();
        *self.current.write() = index;
        info!("Refreshed catalog snapshot: {} recipes", count);
        Ok(count)
    }
}
