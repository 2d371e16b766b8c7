//! Feedback tracking for one user session.
//!
//! The tracker records likes and dislikes, remembers what was shown, and
//! reorders fresh suggestions by how closely they resemble liked recipes.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use catalog::{Preferences, Recipe, RecipeIndex};

use crate::error::Result;
use crate::orchestrator::RecommendationOrchestrator;
use crate::session::UserSession;

/// Similarity points for an identical dietary tag
pub const DIETARY_MATCH_POINTS: u32 = 2;
/// Similarity points for an identical health-goal tag
pub const HEALTH_MATCH_POINTS: u32 = 2;
/// Similarity points for an identical cuisine tag
pub const CUISINE_MATCH_POINTS: u32 = 1;

/// Similarity of `candidate` to one liked recipe.
///
/// Tags are compared with exact string equality, unlike the ranker's
/// substring matching.
pub fn similarity_score(candidate: &Recipe, liked: &Recipe) -> u32 {
    let mut score = 0;
    if candidate.dietary_category == liked.dietary_category {
        score += DIETARY_MATCH_POINTS;
    }
    if candidate.health_goals == liked.health_goals {
        score += HEALTH_MATCH_POINTS;
    }
    if candidate.cuisine == liked.cuisine {
        score += CUISINE_MATCH_POINTS;
    }
    score
}

/// Tracks what one session has seen and rated, and reorders suggestions
/// by similarity to what the user liked.
///
/// Every operation works against the catalog snapshot current when it
/// started, even if the catalog is refreshed midway.
pub struct FeedbackTracker {
    orchestrator: Arc<RecommendationOrchestrator>,
    session: Arc<UserSession>,
}

impl FeedbackTracker {
    pub fn new(orchestrator: Arc<RecommendationOrchestrator>, session: Arc<UserSession>) -> Self {
        Self { orchestrator, session }
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn orchestrator(&self) -> &RecommendationOrchestrator {
        &self.orchestrator
    }

    /// Load the user's saved likes and dislikes into the session ledger.
    ///
    /// Names are resolved to ids through the current catalog; names no
    /// longer in the catalog are skipped. Restored recipes are not marked
    /// seen. Guests have nothing saved. Returns the number restored.
    pub fn restore_saved_feedback(&self) -> Result<usize> {
        let Some(username) = self.session.identity().username() else {
            return Ok(0);
        };

        let accounts = self.orchestrator.accounts();
        let liked = accounts.liked_recipe_names(username)?;
        let disliked = accounts.disliked_recipe_names(username)?;
        let snapshot = self.orchestrator.snapshot();

        let mut state = self.session.lock();
        let mut restored = 0;
        for (names, is_like) in [(liked, true), (disliked, false)] {
            for name in names {
                if let Some(recipe) = snapshot.get_recipe_by_name(&name) {
                    state.restore(&recipe.id, is_like);
                    restored += 1;
                }
            }
        }
        drop(state);

        info!("Restored {} saved ratings for {}", restored, username);
        Ok(restored)
    }

    /// Remember that a recipe was shown. Returns true the first time.
    pub fn mark_seen(&self, recipe: &Recipe) -> bool {
        if recipe.id.is_empty() {
            return false;
        }
        self.session.lock().mark_seen(&recipe.id)
    }

    /// Record a like or dislike.
    ///
    /// For a registered user the recipe name is written to the account
    /// store first; if that write fails nothing in the session changes.
    /// Returns `Ok(false)` for a recipe without an id.
    #[instrument(skip(self, recipe), fields(recipe = %recipe.name))]
    pub fn record_feedback(&self, recipe: &Recipe, liked: bool) -> Result<bool> {
        if recipe.id.is_empty() {
            return Ok(false);
        }

        let mut state = self.session.lock();

        if let Some(username) = self.session.identity().username() {
            let accounts = self.orchestrator.accounts();
            if liked {
                accounts.add_liked(username, &recipe.name)?;
            } else {
                accounts.add_disliked(username, &recipe.name)?;
            }
        }

        state.record(&recipe.id, liked);
        debug!("Recorded {} for {}", if liked { "like" } else { "dislike" }, recipe.id);
        Ok(true)
    }

    /// The orchestrator's next batch with already-seen recipes removed
    pub fn get_new_suggestions(&self, prefs: &Preferences) -> Result<Vec<Recipe>> {
        self.new_suggestions_in(&self.orchestrator.snapshot(), prefs)
    }

    fn new_suggestions_in(&self, snapshot: &RecipeIndex, prefs: &Preferences) -> Result<Vec<Recipe>> {
        let batch = self
            .orchestrator
            .get_recommendations_in(snapshot, prefs, self.session.identity())?;
        let total = batch.len();

        let state = self.session.lock();
        let unseen: Vec<Recipe> = batch
            .into_iter()
            .filter(|recipe| !state.is_seen(&recipe.id))
            .collect();
        drop(state);

        info!("New suggestions: {} unseen of {} candidates", unseen.len(), total);
        Ok(unseen)
    }

    /// Unseen suggestions, most similar to the user's liked recipes first
    pub fn get_feedback_based_recommendations(&self, prefs: &Preferences) -> Result<Vec<Recipe>> {
        self.feedback_based_in(&self.orchestrator.snapshot(), prefs)
    }

    fn feedback_based_in(&self, snapshot: &RecipeIndex, prefs: &Preferences) -> Result<Vec<Recipe>> {
        let suggestions = self.new_suggestions_in(snapshot, prefs)?;
        let liked = self.liked_in_catalog(snapshot);

        if liked.is_empty() {
            debug!("No liked recipes in catalog, keeping suggestion order");
            return Ok(suggestions);
        }

        let mut scored: Vec<(Recipe, u32)> = suggestions
            .into_iter()
            .map(|candidate| {
                let total = liked
                    .iter()
                    .map(|liked| similarity_score(&candidate, liked))
                    .sum();
                (candidate, total)
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(scored.into_iter().map(|(recipe, _)| recipe).collect())
    }

    /// Positively rated recipes still present in `snapshot`
    fn liked_in_catalog<'a>(&self, snapshot: &'a RecipeIndex) -> Vec<&'a Recipe> {
        self.session
            .lock()
            .positively_rated()
            .iter()
            .filter_map(|id| snapshot.get_recipe(id))
            .collect()
    }

    /// Forget what was shown; feedback stays
    pub fn reset_seen(&self) {
        self.session.lock().reset_seen();
        info!("Seen set cleared");
    }

    pub fn seen_count(&self) -> usize {
        self.session.seen_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BatchOrdering, RecommendationConfig};
    use crate::session::{DISLIKED, LIKED, SessionPhase};
    use accounts::{AccountStore, InMemoryAccountStore, UserIdentity};
    use catalog::SharedCatalog;

    fn recipe(id: &str, name: &str, cuisine: &str, diet: &str, health: &str) -> Recipe {
        Recipe::new(id, name)
            .with_cuisine(cuisine)
            .with_dietary_category(diet)
            .with_health_goals(health)
    }

    fn build_tracker(
        recipes: Vec<Recipe>,
        identity: UserIdentity,
    ) -> (FeedbackTracker, Arc<InMemoryAccountStore>) {
        let store = Arc::new(InMemoryAccountStore::new());
        store.ensure_account("alice").unwrap();
        let catalog = Arc::new(SharedCatalog::from_index(RecipeIndex::from_recipes(recipes).unwrap()));
        let config = RecommendationConfig::default()
            .with_ordering(BatchOrdering::RankThenCap)
            .with_batch_size(10);
        let orchestrator = Arc::new(RecommendationOrchestrator::new(catalog, store.clone(), config));
        let tracker = FeedbackTracker::new(orchestrator, Arc::new(UserSession::new(identity)));
        (tracker, store)
    }

    fn three_recipes() -> Vec<Recipe> {
        vec![
            recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie"),
            recipe("z", "Recipe Z", "mexican", "keto", "high-protein"),
            recipe("y", "Recipe Y", "american", "vegetarian", "low-calorie"),
        ]
    }

    #[test]
    fn test_similarity_score_uses_exact_equality() {
        let liked = recipe("a", "A", "italian", "vegetarian", "low-calorie");

        assert_eq!(similarity_score(&liked.clone(), &liked), 5);
        assert_eq!(
            similarity_score(&recipe("b", "B", "italian", "vegetarian,gluten-free", "low-calorie"), &liked),
            3
        );
        assert_eq!(similarity_score(&recipe("c", "C", "Italian", "keto", "high-protein"), &liked), 0);
    }

    #[test]
    fn test_mark_seen_ignores_empty_id() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);

        assert!(!tracker.mark_seen(&Recipe::new("", "Nameless")));
        assert_eq!(tracker.seen_count(), 0);
        assert_eq!(tracker.session().phase(), SessionPhase::Fresh);
    }

    #[test]
    fn test_record_feedback_writes_names_to_store() {
        let (tracker, store) = build_tracker(three_recipes(), UserIdentity::registered("alice"));
        let x = recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie");

        assert!(tracker.record_feedback(&x, true).unwrap());
        assert_eq!(store.liked_recipe_names("alice").unwrap(), vec!["Recipe X"]);

        tracker.record_feedback(&x, false).unwrap();
        assert!(store.liked_recipe_names("alice").unwrap().is_empty());
        assert_eq!(store.disliked_recipe_names("alice").unwrap(), vec!["Recipe X"]);
        assert_eq!(tracker.session().feedback_for("x"), Some(DISLIKED));
    }

    #[test]
    fn test_record_feedback_store_failure_leaves_session_untouched() {
        // "bob" has no account, so the store rejects the write
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::registered("bob"));
        let x = recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie");

        assert!(tracker.record_feedback(&x, true).is_err());
        assert_eq!(tracker.session().feedback_for("x"), None);
        assert_eq!(tracker.seen_count(), 0);
        assert_eq!(tracker.session().phase(), SessionPhase::Fresh);
    }

    #[test]
    fn test_guest_feedback_stays_in_session() {
        let (tracker, store) = build_tracker(three_recipes(), UserIdentity::Guest);
        let x = recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie");

        assert!(tracker.record_feedback(&x, true).unwrap());
        assert_eq!(tracker.session().feedback_for("x"), Some(LIKED));
        assert!(store.liked_recipe_names("alice").unwrap().is_empty());
    }

    #[test]
    fn test_new_suggestions_skip_seen() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        tracker.mark_seen(&recipe("z", "Recipe Z", "", "", ""));

        let ids: Vec<String> = tracker
            .get_new_suggestions(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_feedback_based_order_prefers_similar_recipes() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::registered("alice"));
        let x = recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie");
        tracker.record_feedback(&x, true).unwrap();

        let names: Vec<String> = tracker
            .get_feedback_based_recommendations(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Recipe Y", "Recipe Z"]);
    }

    #[test]
    fn test_dislikes_do_not_attract() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        tracker
            .record_feedback(&recipe("y", "Recipe Y", "american", "vegetarian", "low-calorie"), false)
            .unwrap();

        // Only a dislike in the ledger: order stays as ranked
        let ids: Vec<String> = tracker
            .get_feedback_based_recommendations(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["x", "z"]);
    }

    #[test]
    fn test_liked_recipe_gone_from_catalog_adds_nothing() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        tracker
            .record_feedback(&recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie"), true)
            .unwrap();

        let without_x = catalog::InMemoryCatalog::new(vec![
            recipe("z", "Recipe Z", "mexican", "keto", "high-protein"),
            recipe("y", "Recipe Y", "american", "vegetarian", "low-calorie"),
        ]);
        tracker.orchestrator().refresh_catalog(&without_x).unwrap();

        let plain: Vec<String> = tracker
            .get_new_suggestions(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        let by_feedback: Vec<String> = tracker
            .get_feedback_based_recommendations(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(plain, vec!["z", "y"]);
        assert_eq!(by_feedback, plain);
        assert_eq!(tracker.session().feedback_for("x"), Some(LIKED));
    }

    #[test]
    fn test_feedback_order_uses_one_snapshot() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        tracker
            .record_feedback(&recipe("x", "Recipe X", "italian", "vegetarian", "low-calorie"), true)
            .unwrap();
        let held = tracker.orchestrator().snapshot();

        // After the refresh X looks like Z instead of Y
        let retagged = catalog::InMemoryCatalog::new(vec![
            recipe("x", "Recipe X", "mexican", "keto", "high-protein"),
            recipe("z", "Recipe Z", "mexican", "keto", "high-protein"),
            recipe("y", "Recipe Y", "american", "vegetarian", "low-calorie"),
        ]);
        tracker.orchestrator().refresh_catalog(&retagged).unwrap();

        let ids = |recipes: Vec<Recipe>| recipes.into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(
            ids(tracker.feedback_based_in(&held, &Preferences::new()).unwrap()),
            vec!["y", "z"]
        );
        assert_eq!(
            ids(tracker.get_feedback_based_recommendations(&Preferences::new()).unwrap()),
            vec!["z", "y"]
        );
    }

    #[test]
    fn test_restore_saved_feedback_orders_by_saved_likes() {
        let mut recipes = three_recipes();
        recipes.push(recipe("w", "Recipe W", "french", "paleo", "high-calorie"));
        let (tracker, store) = build_tracker(recipes, UserIdentity::registered("alice"));
        store.add_liked("alice", "Recipe X").unwrap();
        store.add_disliked("alice", "Recipe W").unwrap();
        store.add_liked("alice", "Not In Catalog").unwrap();

        assert_eq!(tracker.restore_saved_feedback().unwrap(), 2);
        assert_eq!(tracker.session().feedback_for("x"), Some(LIKED));
        assert_eq!(tracker.session().feedback_for("w"), Some(DISLIKED));
        assert_eq!(tracker.seen_count(), 0);

        // Y shares X's dietary and health tags and moves ahead of Z
        let ids: Vec<String> = tracker
            .get_feedback_based_recommendations(&Preferences::new())
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["y", "z"]);
    }

    #[test]
    fn test_guest_has_nothing_to_restore() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        assert_eq!(tracker.restore_saved_feedback().unwrap(), 0);
        assert_eq!(tracker.session().phase(), SessionPhase::Fresh);
    }

    #[test]
    fn test_reset_seen_brings_recipes_back() {
        let (tracker, _) = build_tracker(three_recipes(), UserIdentity::Guest);
        for r in three_recipes() {
            tracker.mark_seen(&r);
        }
        assert!(tracker.get_new_suggestions(&Preferences::new()).unwrap().is_empty());

        tracker.reset_seen();
        assert_eq!(tracker.get_new_suggestions(&Preferences::new()).unwrap().len(), 3);
        assert_eq!(tracker.session().phase(), SessionPhase::Active);
    }
}
