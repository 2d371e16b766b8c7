//! Account-side domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a session belongs to.
///
/// Authentication happens before the engine sees the identity. Guests have
/// no account, so nothing about them is read from or written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserIdentity {
    Registered(String),
    Guest,
}

impl UserIdentity {
    /// Registered identity with the username normalized the way the store
    /// keys accounts (trimmed, lower-cased)
    pub fn registered(username: &str) -> Self {
        Self::Registered(normalize_username(username))
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Registered(name) => Some(name),
            Self::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(name) => write!(f, "{}", name),
            Self::Guest => write!(f, "guest"),
        }
    }
}

/// Stored account record.
///
/// Liked and disliked lists hold recipe *names* and never share an entry.
/// Preferences are kept as a JSON string, see [`crate::codec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountRecord {
    pub username: String,
    pub liked_recipes: Vec<String>,
    pub disliked_recipes: Vec<String>,
    pub preferences: String,
}

impl AccountRecord {
    pub fn new(username: &str) -> Self {
        Self {
            username: normalize_username(username),
            ..Self::default()
        }
    }

    /// Add to liked, dropping it from disliked. Returns false if already liked.
    pub fn like(&mut self, recipe_name: &str) -> bool {
        self.disliked_recipes.retain(|name| name != recipe_name);
        if self.liked_recipes.iter().any(|name| name == recipe_name) {
            return false;
        }
        self.liked_recipes.push(recipe_name.to_string());
        true
    }

    /// Add to disliked, dropping it from liked. Returns false if already disliked.
    pub fn dislike(&mut self, recipe_name: &str) -> bool {
        self.liked_recipes.retain(|name| name != recipe_name);
        if self.disliked_recipes.iter().any(|name| name == recipe_name) {
            return false;
        }
        self.disliked_recipes.push(recipe_name.to_string());
        true
    }

    pub fn unlike(&mut self, recipe_name: &str) -> bool {
        let before = self.liked_recipes.len();
        self.liked_recipes.retain(|name| name != recipe_name);
        self.liked_recipes.len() != before
    }
}

pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_then_dislike_is_exclusive() {
        let mut record = AccountRecord::new("Alice");
        assert!(record.like("Veggie Bowl"));
        assert!(record.dislike("Veggie Bowl"));

        assert!(record.liked_recipes.is_empty());
        assert_eq!(record.disliked_recipes, vec!["Veggie Bowl"]);
    }

    #[test]
    fn test_like_twice_reports_no_change() {
        let mut record = AccountRecord::new("alice");
        assert!(record.like("Pad Thai"));
        assert!(!record.like("Pad Thai"));
        assert_eq!(record.liked_recipes.len(), 1);
    }

    #[test]
    fn test_unlike() {
        let mut record = AccountRecord::new("alice");
        record.like("Pad Thai");
        assert!(record.unlike("Pad Thai"));
        assert!(!record.unlike("Pad Thai"));
    }

    #[test]
    fn test_identity() {
        let user = UserIdentity::registered("  Alice ");
        assert_eq!(user.username(), Some("alice"));
        assert!(!user.is_guest());
        assert_eq!(UserIdentity::Guest.username(), None);
        assert_eq!(UserIdentity::Guest.to_string(), "guest");
    }
}
