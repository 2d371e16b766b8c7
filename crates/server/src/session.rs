//! Per-login session state.
//!
//! A `UserSession` is created when a user logs in (or starts as a guest)
//! and dropped on logout. It owns the seen set, the feedback ledger and the
//! liked/disliked id sets, all behind a single mutex, so a read-modify-write
//! such as recording feedback is atomic per session. Sessions never share
//! state with each other.

use accounts::UserIdentity;
use catalog::RecipeId;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, HashSet};

/// Ledger weight of a like
pub const LIKED: i8 = 1;
/// Ledger weight of a dislike
pub const DISLIKED: i8 = -1;

/// Fresh until the first recipe is seen or rated, or saved feedback is
/// restored; resetting the seen set does not make a session fresh again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Fresh,
    Active,
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    seen: HashSet<RecipeId>,
    ledger: HashMap<RecipeId, i8>,
    liked: HashSet<RecipeId>,
    disliked: HashSet<RecipeId>,
    active: bool,
}

impl SessionState {
    /// Returns true if the id was not seen before
    pub(crate) fn mark_seen(&mut self, id: &str) -> bool {
        self.active = true;
        self.seen.insert(id.to_string())
    }

    pub(crate) fn is_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub(crate) fn record(&mut self, id: &str, liked: bool) {
        self.restore(id, liked);
        self.mark_seen(id);
    }

    /// Feedback carried over from an earlier session: ledger and sets only,
    /// the recipe is not marked seen
    pub(crate) fn restore(&mut self, id: &str, liked: bool) {
        self.active = true;
        self.ledger
            .insert(id.to_string(), if liked { LIKED } else { DISLIKED });
        if liked {
            self.disliked.remove(id);
            self.liked.insert(id.to_string());
        } else {
            self.liked.remove(id);
            self.disliked.insert(id.to_string());
        }
    }

    /// Ids with a positive ledger weight
    pub(crate) fn positively_rated(&self) -> Vec<RecipeId> {
        self.ledger
            .iter()
            .filter(|(_, weight)| **weight > 0)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub(crate) fn reset_seen(&mut self) {
        self.seen.clear();
    }
}

/// State of one user's session
#[derive(Debug)]
pub struct UserSession {
    identity: UserIdentity,
    state: Mutex<SessionState>,
}

impl UserSession {
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn guest() -> Self {
        Self::new(UserIdentity::Guest)
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.lock().active {
            SessionPhase::Active
        } else {
            SessionPhase::Fresh
        }
    }

    pub fn seen_count(&self) -> usize {
        self.state.lock().seen.len()
    }

    /// Latest feedback recorded for a recipe, +1 or -1
    pub fn feedback_for(&self, id: &str) -> Option<i8> {
        self.state.lock().ledger.get(id).copied()
    }

    // Accessors below hand out copies; the live sets never leave the lock.

    pub fn seen_ids(&self) -> HashSet<RecipeId> {
        self.state.lock().seen.clone()
    }

    pub fn liked_ids(&self) -> HashSet<RecipeId> {
        self.state.lock().liked.clone()
    }

    pub fn disliked_ids(&self) -> HashSet<RecipeId> {
        self.state.lock().disliked.clone()
    }

    pub fn ledger(&self) -> HashMap<RecipeId, i8> {
        self.state.lock().ledger.clone()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock()
    }
}
