use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub order: u32,
    pub instruction: String,
}

/// Caller-supplied constraints, echoed back verbatim with the recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    pub cuisine: Option<String>,
    pub servings: Option<u32>,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub summary: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<RecipeStep>,
    pub metadata: RecipeMetadata,
}

/// Recipe JSON in the shape the model emitted it, before any defaulting.
///
/// Every field is kept as a raw [`Value`] so that one mis-typed field never
/// prevents the others from being read: absent fields decode to `Null` and
/// all interpretation happens in a single later pass that substitutes
/// defaults field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipePayload {
    pub title: Value,
    pub summary: Value,
    pub ingredients: Value,
    pub steps: Value,
}
