//! Account store boundary and its implementations.
//!
//! The engine reads liked/disliked recipe names and preferences through
//! [`AccountStore`], and writes likes, dislikes and preference edits back
//! through it. How accounts are persisted is the store's business.

use crate::codec::{preferences_from_json, preferences_to_json};
use crate::error::{AccountError, Result};
use crate::types::{AccountRecord, normalize_username};
use catalog::Preferences;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Narrow interface to wherever accounts live.
///
/// Reads for an unknown username behave like an empty account. Writes for an
/// unknown username fail with [`AccountError::NotFound`].
pub trait AccountStore: Send + Sync {
    /// Create the account if missing. Returns true if it was created.
    fn ensure_account(&self, username: &str) -> Result<bool>;

    fn liked_recipe_names(&self, username: &str) -> Result<Vec<String>>;

    fn disliked_recipe_names(&self, username: &str) -> Result<Vec<String>>;

    fn preferences(&self, username: &str) -> Result<Preferences>;

    /// Record a like, removing any dislike of the same recipe
    fn add_liked(&self, username: &str, recipe_name: &str) -> Result<bool>;

    /// Record a dislike, removing any like of the same recipe
    fn add_disliked(&self, username: &str, recipe_name: &str) -> Result<bool>;

    fn remove_liked(&self, username: &str, recipe_name: &str) -> Result<bool>;

    fn save_preferences(&self, username: &str, prefs: &Preferences) -> Result<()>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Account store held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_records(records: Vec<AccountRecord>) -> Self {
        let accounts = records
            .into_iter()
            .map(|record| (normalize_username(&record.username), record))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    fn records(&self) -> Vec<AccountRecord> {
        let mut records: Vec<_> = self.accounts.read().values().cloned().collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));
        records
    }

    fn record(&self, key: &str) -> Option<AccountRecord> {
        self.accounts.read().get(key).cloned()
    }

    fn put(&self, key: &str, record: AccountRecord) {
        self.accounts.write().insert(key.to_string(), record);
    }

    fn read<T>(&self, username: &str, f: impl FnOnce(&AccountRecord) -> T) -> Option<T> {
        self.accounts.read().get(&normalize_username(username)).map(f)
    }

    fn update<T>(&self, username: &str, f: impl FnOnce(&mut AccountRecord) -> T) -> Result<T> {
        let key = normalize_username(username);
        let mut accounts = self.accounts.write();
        let record = accounts
            .get_mut(&key)
            .ok_or_else(|| AccountError::NotFound(key.clone()))?;
        Ok(f(record))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn ensure_account(&self, username: &str) -> Result<bool> {
        let key = normalize_username(username);
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&key) {
            return Ok(false);
        }
        accounts.insert(key.clone(), AccountRecord::new(&key));
        info!("Registered new account: {}", key);
        Ok(true)
    }

    fn liked_recipe_names(&self, username: &str) -> Result<Vec<String>> {
        Ok(self
            .read(username, |record| record.liked_recipes.clone())
            .unwrap_or_default())
    }

    fn disliked_recipe_names(&self, username: &str) -> Result<Vec<String>> {
        Ok(self
            .read(username, |record| record.disliked_recipes.clone())
            .unwrap_or_default())
    }

    fn preferences(&self, username: &str) -> Result<Preferences> {
        match self.read(username, |record| record.preferences.clone()) {
            Some(json) => preferences_from_json(&json),
            None => Ok(Preferences::default()),
        }
    }

    fn add_liked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.like(recipe_name))
    }

    fn add_disliked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.dislike(recipe_name))
    }

    fn remove_liked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.unlike(recipe_name))
    }

    fn save_preferences(&self, username: &str, prefs: &Preferences) -> Result<()> {
        let json = preferences_to_json(prefs)?;
        self.update(username, |record| record.preferences = json)
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// Account store persisted as one JSON document.
///
/// The whole document is loaded on open and rewritten on every write.
/// A write lands on disk before it becomes visible in memory, so a failed
/// file write leaves the account exactly as it was. Writers are serialized
/// across update, serialize and file write.
#[derive(Debug)]
pub struct JsonFileAccountStore {
    path: PathBuf,
    inner: InMemoryAccountStore,
    write_lock: Mutex<()>,
}

impl JsonFileAccountStore {
    /// Open the store at `path`; a missing file starts an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records: Vec<AccountRecord> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        debug!("Opened account store {} ({} accounts)", path.display(), records.len());

        Ok(Self {
            path,
            inner: InMemoryAccountStore::from_records(records),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy of the account and commit the copy.
    fn update<T>(&self, username: &str, f: impl FnOnce(&mut AccountRecord) -> T) -> Result<T> {
        let _writer = self.write_lock.lock();
        let key = normalize_username(username);
        let before = self
            .inner
            .record(&key)
            .ok_or_else(|| AccountError::NotFound(key.clone()))?;

        let mut after = before.clone();
        let outcome = f(&mut after);
        if after != before {
            self.commit(&key, after)?;
        }
        Ok(outcome)
    }

    /// Write the document with `record` in place, then publish it in
    /// memory. Callers hold `write_lock`.
    fn commit(&self, key: &str, record: AccountRecord) -> Result<()> {
        let mut records = self.inner.records();
        match records
            .iter_mut()
            .find(|existing| normalize_username(&existing.username) == key)
        {
            Some(slot) => *slot = record.clone(),
            None => {
                records.push(record.clone());
                records.sort_by(|a, b| a.username.cmp(&b.username));
            }
        }

        let content = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, content)?;
        self.inner.put(key, record);
        Ok(())
    }
}

impl AccountStore for JsonFileAccountStore {
    fn ensure_account(&self, username: &str) -> Result<bool> {
        let _writer = self.write_lock.lock();
        let key = normalize_username(username);
        if self.inner.record(&key).is_some() {
            return Ok(false);
        }
        self.commit(&key, AccountRecord::new(&key))?;
        info!("Registered new account: {}", key);
        Ok(true)
    }

    fn liked_recipe_names(&self, username: &str) -> Result<Vec<String>> {
        self.inner.liked_recipe_names(username)
    }

    fn disliked_recipe_names(&self, username: &str) -> Result<Vec<String>> {
        self.inner.disliked_recipe_names(username)
    }

    fn preferences(&self, username: &str) -> Result<Preferences> {
        self.inner.preferences(username)
    }

    fn add_liked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.like(recipe_name))
    }

    fn add_disliked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.dislike(recipe_name))
    }

    fn remove_liked(&self, username: &str, recipe_name: &str) -> Result<bool> {
        self.update(username, |record| record.unlike(recipe_name))
    }

    fn save_preferences(&self, username: &str, prefs: &Preferences) -> Result<()> {
        let json = preferences_to_json(prefs)?;
        self.update(username, |record| record.preferences = json)
    }
}
