//! # Accounts Crate
//!
//! Account-store boundary for the recommendation engine: who the user is,
//! which recipes they liked or disliked, and their saved preferences.
//!
//! ## Components
//!
//! - **types**: `UserIdentity` (registered or guest) and `AccountRecord`
//! - **store**: the `AccountStore` trait with in-memory and JSON-file stores
//! - **codec**: preferences <-> JSON string
//! - **error**: `AccountError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use accounts::{AccountStore, JsonFileAccountStore, UserIdentity};
//!
//! let store = JsonFileAccountStore::open("data/accounts.json")?;
//! store.ensure_account("alice")?;
//! store.add_liked("alice", "Veggie Bowl")?;
//!
//! let user = UserIdentity::registered("alice");
//! let prefs = store.preferences("alice")?;
//! ```

pub mod codec;
pub mod error;
pub mod store;
pub mod types;

pub use codec::{preferences_from_json, preferences_to_json};
pub use error::{AccountError, Result};
pub use store::{AccountStore, InMemoryAccountStore, JsonFileAccountStore};
pub use types::{AccountRecord, UserIdentity};
