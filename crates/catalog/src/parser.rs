//! Parser for recipe catalog documents.
//!
//! A catalog document is JSON, either a bare array of recipes or an object
//! with a `recipes` array:
//!
//! ```text
//! [{"id": "r1", "name": "Veggie Bowl", "dietary_category": "vegetarian", ...}]
//! {"recipes": [{"_id": "r1", "name": "Veggie Bowl", "NER": ["rice"], ...}]}
//! ```

use crate::error::{CatalogError, Result};
use crate::types::Recipe;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Parse a catalog document held in memory.
///
/// `source_name` is only used in error messages.
pub fn parse_recipes_str(source_name: &str, content: &str) -> Result<Vec<Recipe>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: CatalogDocument =
        serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;

    Ok(match document {
        CatalogDocument::Bare(recipes) => recipes,
        CatalogDocument::Wrapped { recipes } => recipes,
    })
}

/// Parse a catalog document from a file
pub fn parse_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    parse_recipes_str(&path.display().to_string(), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "r1", "name": "Veggie Bowl", "cuisine": "american",
             "dietary_category": "vegetarian", "health_goals": "low-calorie",
             "cook_time": 20, "cost": 8.0, "ingredients": ["rice", "beans"]}
        ]"#;

        let recipes = parse_recipes_str("inline", json).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Veggie Bowl");
        assert_eq!(recipes[0].cook_time, 20);
        assert_eq!(recipes[0].ingredients, vec!["rice", "beans"]);
    }

    #[test]
    fn test_parse_wrapped_with_store_field_names() {
        let json = r#"{"recipes": [
            {"_id": "abc", "name": "Keto Eggs", "dietaryCategory": "keto",
             "healthGoals": "high-protein", "cookTime": 10, "cost": 4.5,
             "NER": ["eggs", "butter"]}
        ]}"#;

        let recipes = parse_recipes_str("inline", json).unwrap();
        assert_eq!(recipes[0].id, "abc");
        assert_eq!(recipes[0].dietary_category, "keto");
        assert_eq!(recipes[0].health_goals, "high-protein");
        assert_eq!(recipes[0].ingredients.len(), 2);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_recipes_str("inline", "   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_recipes_str("inline", "{not json");
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_recipes(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "r1", "name": "Toast"}}]"#).unwrap();

        let recipes = parse_recipes(file.path()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Toast");
    }
}
