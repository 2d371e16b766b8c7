//! Core domain types for recipes and user preferences.
//!
//! Recipes are owned by the catalog and are read-only to the rest of the
//! system. Preferences are owned by the user and are only changed through
//! explicit edits.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a recipe
pub type RecipeId = String;

// =============================================================================
// Recipe
// =============================================================================

/// A recipe as supplied by the recipe store.
///
/// Tag fields are free text. The dietary category may encode several
/// categories at once (e.g. `"vegetarian,gluten-free"`), which is why every
/// consumer matches against it by substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(alias = "_id", default, deserialize_with = "null_as_empty")]
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cuisine: String,
    #[serde(alias = "dietaryCategory", default, deserialize_with = "null_as_empty")]
    pub dietary_category: String,
    #[serde(alias = "healthGoals", default, deserialize_with = "null_as_empty")]
    pub health_goals: String,
    /// Minutes
    #[serde(alias = "cookTime", default)]
    pub cook_time: u32,
    #[serde(default)]
    pub cost: f64,
    /// Named-entity ingredient tokens, in recipe order
    #[serde(alias = "NER", default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// Create a recipe with the given id and name and empty tags.
    pub fn new(id: impl Into<RecipeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cuisine: String::new(),
            dietary_category: String::new(),
            health_goals: String::new(),
            cook_time: 0,
            cost: 0.0,
            ingredients: Vec::new(),
        }
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    pub fn with_dietary_category(mut self, category: impl Into<String>) -> Self {
        self.dietary_category = category.into();
        self
    }

    pub fn with_health_goals(mut self, goals: impl Into<String>) -> Self {
        self.health_goals = goals.into();
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time = minutes;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Preference Keywords
// =============================================================================

/// Dietary restrictions a user can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    Vegetarian,
    Keto,
    GlutenFree,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 3] = [Self::Vegetarian, Self::Keto, Self::GlutenFree];

    /// Keyword searched for in a recipe's dietary category
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Keto => "keto",
            Self::GlutenFree => "gluten-free",
        }
    }
}

/// Health goals a user can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthGoal {
    LowCalorie,
    HighCalorie,
    HighProtein,
}

impl HealthGoal {
    pub const ALL: [HealthGoal; 3] = [Self::LowCalorie, Self::HighCalorie, Self::HighProtein];

    /// Keyword searched for in a recipe's health-goal tag
    pub fn keyword(self) -> &'static str {
        match self {
            Self::LowCalorie => "low-calorie",
            Self::HighCalorie => "high-calorie",
            Self::HighProtein => "high-protein",
        }
    }
}

/// Cuisines a user can show affinity for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Mexican,
    Asian,
    American,
    Mediterranean,
}

impl Cuisine {
    pub const ALL: [Cuisine; 5] = [
        Self::Italian,
        Self::Mexican,
        Self::Asian,
        Self::American,
        Self::Mediterranean,
    ];

    /// Keyword searched for in a recipe's cuisine tag
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Italian => "italian",
            Self::Mexican => "mexican",
            Self::Asian => "asian",
            Self::American => "american",
            Self::Mediterranean => "mediterranean",
        }
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// A user's recommendation preferences.
///
/// Dietary and health flags are hard constraints; cuisine flags, cook time
/// and budget only influence ordering. A zero limit or an empty ingredient
/// list means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub vegetarian: bool,
    pub keto: bool,
    pub gluten_free: bool,

    pub low_calorie: bool,
    pub high_calorie: bool,
    pub high_protein: bool,

    pub italian: bool,
    pub mexican: bool,
    pub asian: bool,
    pub american: bool,
    pub mediterranean: bool,

    /// Minutes, 0 = no limit
    pub max_cook_time: u32,
    /// 0 = no limit
    pub max_budget: f64,
    pub available_ingredients: Vec<String>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requires(&self, restriction: DietaryRestriction) -> bool {
        match restriction {
            DietaryRestriction::Vegetarian => self.vegetarian,
            DietaryRestriction::Keto => self.keto,
            DietaryRestriction::GlutenFree => self.gluten_free,
        }
    }

    pub fn set_restriction(&mut self, restriction: DietaryRestriction, enabled: bool) {
        match restriction {
            DietaryRestriction::Vegetarian => self.vegetarian = enabled,
            DietaryRestriction::Keto => self.keto = enabled,
            DietaryRestriction::GlutenFree => self.gluten_free = enabled,
        }
    }

    pub fn wants_goal(&self, goal: HealthGoal) -> bool {
        match goal {
            HealthGoal::LowCalorie => self.low_calorie,
            HealthGoal::HighCalorie => self.high_calorie,
            HealthGoal::HighProtein => self.high_protein,
        }
    }

    pub fn set_goal(&mut self, goal: HealthGoal, enabled: bool) {
        match goal {
            HealthGoal::LowCalorie => self.low_calorie = enabled,
            HealthGoal::HighCalorie => self.high_calorie = enabled,
            HealthGoal::HighProtein => self.high_protein = enabled,
        }
    }

    pub fn likes_cuisine(&self, cuisine: Cuisine) -> bool {
        match cuisine {
            Cuisine::Italian => self.italian,
            Cuisine::Mexican => self.mexican,
            Cuisine::Asian => self.asian,
            Cuisine::American => self.american,
            Cuisine::Mediterranean => self.mediterranean,
        }
    }

    pub fn set_cuisine(&mut self, cuisine: Cuisine, enabled: bool) {
        match cuisine {
            Cuisine::Italian => self.italian = enabled,
            Cuisine::Mexican => self.mexican = enabled,
            Cuisine::Asian => self.asian = enabled,
            Cuisine::American => self.american = enabled,
            Cuisine::Mediterranean => self.mediterranean = enabled,
        }
    }

    /// Enabled dietary restrictions, in declaration order
    pub fn dietary_restrictions(&self) -> Vec<DietaryRestriction> {
        DietaryRestriction::ALL
            .into_iter()
            .filter(|&r| self.requires(r))
            .collect()
    }

    /// Enabled health goals, in declaration order
    pub fn health_goals(&self) -> Vec<HealthGoal> {
        HealthGoal::ALL
            .into_iter()
            .filter(|&g| self.wants_goal(g))
            .collect()
    }

    /// Enabled cuisines, in declaration order
    pub fn cuisines(&self) -> Vec<Cuisine> {
        Cuisine::ALL
            .into_iter()
            .filter(|&c| self.likes_cuisine(c))
            .collect()
    }

    /// Available ingredients normalized for matching: trimmed, lower-cased,
    /// blanks dropped.
    pub fn ingredient_tokens(&self) -> Vec<String> {
        self.available_ingredients
            .iter()
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Restore every field to its default (no constraints at all).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vegetarian: {}", self.vegetarian)?;
        writeln!(f, "Keto: {}", self.keto)?;
        writeln!(f, "Gluten Free: {}", self.gluten_free)?;
        writeln!(f, "Low Calorie: {}", self.low_calorie)?;
        writeln!(f, "High Calorie: {}", self.high_calorie)?;
        writeln!(f, "High Protein: {}", self.high_protein)?;
        writeln!(f, "Italian: {}", self.italian)?;
        writeln!(f, "Mexican: {}", self.mexican)?;
        writeln!(f, "Asian: {}", self.asian)?;
        writeln!(f, "American: {}", self.american)?;
        writeln!(f, "Mediterranean: {}", self.mediterranean)?;
        writeln!(f, "Max Cook Time: {}", self.max_cook_time)?;
        writeln!(f, "Max Budget: {}", self.max_budget)?;
        write!(
            f,
            "Available Ingredients: [{}]",
            self.available_ingredients.join(", ")
        )
    }
}
