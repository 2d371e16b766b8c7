//! Preferences <-> JSON string codec.
//!
//! Account stores persist preferences as a JSON string. Blank input decodes
//! to default preferences, and missing fields take their defaults, so
//! documents written by older clients keep loading.

use crate::error::Result;
use catalog::Preferences;

/// Encode preferences as a compact JSON object
pub fn preferences_to_json(prefs: &Preferences) -> Result<String> {
    Ok(serde_json::to_string(prefs)?)
}

/// Decode preferences, treating blank input as "no preferences"
pub fn preferences_from_json(json: &str) -> Result<Preferences> {
    if json.trim().is_empty() {
        return Ok(Preferences::default());
    }
    Ok(serde_json::from_str(json)?)
}
