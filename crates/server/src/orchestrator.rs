//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline:
//! 1. Take a catalog snapshot
//! 2. Apply the mandatory filters
//! 3. Rank the survivors by soft score
//! 4. Drop recipes the user already liked or disliked
//! 5. Shuffle (or not, per config) and cap the batch
//!
//! Empty results at any step short-circuit to an empty batch. Only a
//! failing collaborator turns into an error.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use accounts::{AccountStore, UserIdentity};
use catalog::{Preferences, Recipe, RecipeCatalog, RecipeIndex, SharedCatalog};
use pipeline::{PreferenceMatcher, RecipeRanker, ScoredRecipe};

use crate::config::{BatchOrdering, RecommendationConfig};
use crate::error::Result;

/// Main orchestrator that coordinates the recommendation pipeline
pub struct RecommendationOrchestrator {
    catalog: Arc<SharedCatalog>,
    accounts: Arc<dyn AccountStore>,
    matcher: PreferenceMatcher,
    config: RecommendationConfig,
    rng: Mutex<StdRng>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `catalog` - Shared catalog snapshot, refreshed in place by swapping
    /// * `accounts` - Account store for liked/disliked names and preferences
    /// * `config` - Batch size, ordering mode and optional shuffle seed
    pub fn new(
        catalog: Arc<SharedCatalog>,
        accounts: Arc<dyn AccountStore>,
        config: RecommendationConfig,
    ) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog,
            accounts,
            matcher: PreferenceMatcher::new(),
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    /// The catalog snapshot current at call time
    pub fn snapshot(&self) -> Arc<RecipeIndex> {
        self.catalog.snapshot()
    }

    /// Re-fetch the whole catalog from `source` and swap it in
    pub fn refresh_catalog(&self, source: &dyn RecipeCatalog) -> Result<usize> {
        Ok(self.catalog.refresh(source)?)
    }

    /// Look up a recipe by name, ignoring case
    pub fn recipe_by_name(&self, name: &str) -> Option<Recipe> {
        self.snapshot().get_recipe_by_name(name).cloned()
    }

    /// Copy of every recipe in the current snapshot
    pub fn all_recipes(&self) -> Vec<Recipe> {
        self.snapshot().recipes().to_vec()
    }

    pub fn total_recipe_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Main entry point: the next batch of recipes to show
    ///
    /// # Returns
    /// At most `batch_size` recipes. Empty when the catalog is empty, no
    /// recipe passes the mandatory filters, or the user already rated
    /// everything that does.
    pub fn get_recommendations(&self, prefs: &Preferences, user: &UserIdentity) -> Result<Vec<Recipe>> {
        self.get_recommendations_in(&self.snapshot(), prefs, user)
    }

    /// [`Self::get_recommendations`] against a snapshot the caller already holds
    #[instrument(skip(self, snapshot, prefs, user), fields(user = %user))]
    pub fn get_recommendations_in(
        &self,
        snapshot: &RecipeIndex,
        prefs: &Preferences,
        user: &UserIdentity,
    ) -> Result<Vec<Recipe>> {
        let start_time = Instant::now();

        let ranked = self.ranked_candidates_in(snapshot, prefs, user)?;
        let pool_size = ranked.len();
        let mut batch: Vec<Recipe> = ranked.into_iter().map(|scored| scored.recipe).collect();

        if self.config.ordering == BatchOrdering::ShuffleThenCap {
            batch.shuffle(&mut *self.rng.lock());
        }
        batch.truncate(self.config.batch_size);

        info!(
            "Returning {} recommendations from a pool of {} in {:.2?}",
            batch.len(),
            pool_size,
            start_time.elapsed()
        );
        Ok(batch)
    }

    /// Steps 1-4 of the pipeline: filtered, ranked and de-duplicated
    /// against the user's likes and dislikes, with scores, best first.
    pub fn ranked_candidates(&self, prefs: &Preferences, user: &UserIdentity) -> Result<Vec<ScoredRecipe>> {
        self.ranked_candidates_in(&self.snapshot(), prefs, user)
    }

    pub fn ranked_candidates_in(
        &self,
        snapshot: &RecipeIndex,
        prefs: &Preferences,
        user: &UserIdentity,
    ) -> Result<Vec<ScoredRecipe>> {
        if snapshot.is_empty() {
            debug!("Catalog snapshot is empty");
            return Ok(Vec::new());
        }

        let filtered: Vec<Recipe> = self
            .matcher
            .filter_candidates(snapshot.recipes(), prefs)
            .into_iter()
            .cloned()
            .collect();
        if filtered.is_empty() {
            info!("No recipes satisfy hard constraints");
            return Ok(Vec::new());
        }

        let mut ranked = RecipeRanker::with_candidates(filtered).rank_scored(prefs);

        let excluded = self.rated_recipe_names(user)?;
        let before = ranked.len();
        ranked.retain(|scored| !excluded.contains(&scored.recipe.name));
        debug!(
            "Removed {} already rated recipes, {} remain",
            before - ranked.len(),
            ranked.len()
        );

        Ok(ranked)
    }

    /// Names the user has liked or disliked. Guests have none.
    fn rated_recipe_names(&self, user: &UserIdentity) -> Result<HashSet<String>> {
        let Some(username) = user.username() else {
            return Ok(HashSet::new());
        };

        let mut names: HashSet<String> = self.accounts.liked_recipe_names(username)?.into_iter().collect();
        names.extend(self.accounts.disliked_recipe_names(username)?);
        Ok(names)
    }

    /// Full recipes for the user's liked names that are still in the catalog
    pub fn liked_recipes(&self, user: &UserIdentity) -> Result<Vec<Recipe>> {
        let Some(username) = user.username() else {
            return Ok(Vec::new());
        };

        let liked: HashSet<String> = self.accounts.liked_recipe_names(username)?.into_iter().collect();
        Ok(self
            .snapshot()
            .recipes()
            .iter()
            .filter(|recipe| liked.contains(&recipe.name))
            .cloned()
            .collect())
    }

    /// Saved preferences; guests always get the defaults
    pub fn preferences(&self, user: &UserIdentity) -> Result<Preferences> {
        match user.username() {
            Some(username) => Ok(self.accounts.preferences(username)?),
            None => Ok(Preferences::default()),
        }
    }

    /// Persist an explicit preference edit. A no-op for guests.
    pub fn save_preferences(&self, user: &UserIdentity, prefs: &Preferences) -> Result<()> {
        if let Some(username) = user.username() {
            self.accounts.save_preferences(username, prefs)?;
            info!("Saved preferences for {}", username);
        }
        Ok(())
    }

    /// Reset the user's preferences to the defaults and persist them
    pub fn reset_preferences(&self, user: &UserIdentity) -> Result<Preferences> {
        let mut prefs = self.preferences(user)?;
        prefs.reset();
        self.save_preferences(user, &prefs)?;
        Ok(prefs)
    }
}
