use log::{debug, error, warn};
use serde_json::Value;

use crate::config::Settings;
use crate::error::PlannerError;
use crate::model::{Recipe, RecipeMetadata, RecipePayload, RecipeStep};
use crate::parsing::{self, parse_ingredient_list};
use crate::prompt;
use crate::providers::CompletionProvider;
use crate::upload::UploadedAsset;
use crate::vision::VisionClient;

const DEFAULT_TITLE: &str = "Untitled Recipe";
const DEFAULT_SUMMARY: &str = "A tasty meal created from the available fridge ingredients.";

/// Inputs for a single meal-planning request
#[derive(Debug, Clone, Default)]
pub struct MealRequest {
    /// Fridge photos or documents to scan for ingredients
    pub uploads: Vec<UploadedAsset>,
    /// Comma-separated ingredients typed by the user
    pub manual_ingredients: Option<String>,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub cuisine: Option<String>,
    pub servings: Option<u32>,
    /// Regeneration counter; positive values rotate through variety hints
    pub recipe_index: Option<u32>,
}

/// Coordinates ingredient detection and recipe generation
pub struct MealPlanner {
    vision: VisionClient,
}

impl MealPlanner {
    /// Create a planner backed by the live Gemini service
    pub fn new(settings: &Settings) -> Result<Self, PlannerError> {
        Ok(MealPlanner {
            vision: VisionClient::new(settings)?,
        })
    }

    /// Create a planner over any completion provider
    pub fn with_provider(settings: &Settings, provider: Box<dyn CompletionProvider>) -> Self {
        MealPlanner {
            vision: VisionClient::with_provider(settings, provider),
        }
    }

    /// Detect ingredients across all uploads and author a recipe from them
    ///
    /// Uploads are scanned one at a time in the order given, the recognized
    /// names are merged with the manual list and deduplicated, and a single
    /// recipe request is made over the result. Malformed recipe output never
    /// fails the call; it degrades to default fields.
    ///
    /// # Errors
    /// Returns [`PlannerError::NoIngredients`] when no upload or manual entry
    /// produced a usable ingredient, or [`PlannerError::Service`] when the
    /// completion service fails.
    pub async fn plan_meal(&self, request: MealRequest) -> Result<Recipe, PlannerError> {
        let mut detected: Vec<String> = Vec::new();
        for upload in &request.uploads {
            let mime_type = upload.mime_type();
            let raw = self
                .vision
                .extract_ingredients(&upload.bytes, &mime_type)
                .await?;
            detected.extend(parse_ingredient_list(&raw));
        }

        if let Some(manual) = &request.manual_ingredients {
            detected.extend(manual.split(',').map(str::to_string));
        }

        let ingredients = parsing::dedupe_ingredients(detected);
        debug!("Detected ingredients: {:?}", ingredients);
        if ingredients.is_empty() {
            return Err(PlannerError::NoIngredients);
        }

        let variety_hint = request
            .recipe_index
            .filter(|&index| index > 0)
            .map(prompt::variety_hint);

        let metadata = RecipeMetadata {
            cuisine: request.cuisine,
            servings: request.servings,
            dietary_preferences: request.dietary_preferences,
            allergies: request.allergies,
        };

        let raw_recipe = self
            .vision
            .generate_recipe(&ingredients, &metadata, variety_hint)
            .await?;
        debug!("Raw recipe completion: {raw_recipe}");

        let payload = parse_recipe_payload(&raw_recipe);
        Ok(assemble_recipe(payload, metadata))
    }
}

/// Decode the recipe JSON returned by the model
///
/// Any failure, from a missing JSON block to invalid JSON, degrades to an
/// empty payload so the caller can still assemble a presentable recipe.
fn parse_recipe_payload(raw_recipe: &str) -> RecipePayload {
    if raw_recipe.is_empty() {
        warn!("Model returned an empty recipe payload");
        return RecipePayload::default();
    }

    let block = match parsing::extract_json_block(raw_recipe) {
        Ok(block) => block,
        Err(err) => {
            error!("Failed to parse recipe response: {err}");
            return RecipePayload::default();
        }
    };
    match serde_json::from_str(block) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Failed to parse recipe response: {err}");
            RecipePayload::default()
        }
    }
}

/// Assemble the final recipe, substituting defaults field by field
///
/// This is the single place where the payload's raw values are interpreted:
/// an absent or mis-typed field falls back to its default without affecting
/// its neighbors.
fn assemble_recipe(payload: RecipePayload, metadata: RecipeMetadata) -> Recipe {
    let title = payload
        .title
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let summary = payload
        .summary
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    // An absent ingredients field re-serializes as an empty array, not null
    let ingredients_value = if payload.ingredients.is_null() {
        Value::Array(Vec::new())
    } else {
        payload.ingredients
    };
    let ingredients = parse_ingredient_list(&ingredients_value.to_string());

    Recipe {
        title,
        summary,
        ingredients,
        steps: collect_steps(&payload.steps),
        metadata,
    }
}

/// Keep only well-formed steps: objects carrying a non-empty instruction
///
/// A missing or non-positive order defaults to the step's 1-based position
/// among the retained steps.
fn collect_steps(steps: &Value) -> Vec<RecipeStep> {
    let Some(entries) = steps.as_array() else {
        return Vec::new();
    };

    let mut retained = Vec::new();
    for entry in entries {
        let Some(instruction) = entry
            .get("instruction")
            .and_then(Value::as_str)
            .filter(|instruction| !instruction.is_empty())
        else {
            continue;
        };
        let order = entry
            .get("order")
            .and_then(Value::as_u64)
            .and_then(|order| u32::try_from(order).ok())
            .filter(|&order| order >= 1)
            .unwrap_or(retained.len() as u32 + 1);
        retained.push(RecipeStep {
            order,
            instruction: instruction.to_string(),
        });
    }
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_from(raw: &str) -> RecipePayload {
        parse_recipe_payload(raw)
    }

    #[test]
    fn test_full_payload_is_mapped_through() {
        let raw = json!({
            "title": "Veggie Omelette",
            "summary": "A quick omelette.",
            "ingredients": ["Eggs", "Milk", "eggs"],
            "steps": [
                {"order": 1, "instruction": "Whisk the eggs."},
                {"order": 2, "instruction": "Cook in a hot pan."}
            ]
        })
        .to_string();

        let recipe = assemble_recipe(payload_from(&raw), RecipeMetadata::default());
        assert_eq!(recipe.title, "Veggie Omelette");
        assert_eq!(recipe.summary, "A quick omelette.");
        assert_eq!(recipe.ingredients, vec!["Eggs", "Milk"]);
        assert_eq!(
            recipe.steps,
            vec![
                RecipeStep {
                    order: 1,
                    instruction: "Whisk the eggs.".to_string()
                },
                RecipeStep {
                    order: 2,
                    instruction: "Cook in a hot pan.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unparsable_response_degrades_to_defaults() {
        let recipe = assemble_recipe(
            payload_from("The chef refuses to answer."),
            RecipeMetadata::default(),
        );
        assert_eq!(recipe.title, DEFAULT_TITLE);
        assert_eq!(recipe.summary, DEFAULT_SUMMARY);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_empty_response_degrades_to_defaults() {
        let recipe = assemble_recipe(payload_from(""), RecipeMetadata::default());
        assert_eq!(recipe.title, DEFAULT_TITLE);
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_mistyped_steps_do_not_affect_other_fields() {
        let raw = json!({
            "title": "Soup",
            "steps": "simmer everything"
        })
        .to_string();

        let recipe = assemble_recipe(payload_from(&raw), RecipeMetadata::default());
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.summary, DEFAULT_SUMMARY);
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_steps_keep_only_objects_with_instructions() {
        let raw = json!({
            "steps": [
                {"order": 1, "instruction": "Chop the onions."},
                "just a string",
                {"order": 3},
                {"order": 4, "instruction": ""},
                {"instruction": "Serve warm."}
            ]
        })
        .to_string();

        let recipe = assemble_recipe(payload_from(&raw), RecipeMetadata::default());
        assert_eq!(
            recipe.steps,
            vec![
                RecipeStep {
                    order: 1,
                    instruction: "Chop the onions.".to_string()
                },
                RecipeStep {
                    order: 2,
                    instruction: "Serve warm.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_order_counts_retained_steps_only() {
        // The dropped middle entry must not leave a gap in the numbering
        let steps = json!([
            {"instruction": "First."},
            {"bogus": true},
            {"instruction": "Second."}
        ]);
        let collected = collect_steps(&steps);
        assert_eq!(collected[0].order, 1);
        assert_eq!(collected[1].order, 2);
    }

    #[test]
    fn test_explicit_orders_are_kept_verbatim() {
        let steps = json!([
            {"order": 7, "instruction": "Rest the dough."},
            {"order": 2, "instruction": "Bake."}
        ]);
        let collected = collect_steps(&steps);
        assert_eq!(collected[0].order, 7);
        assert_eq!(collected[1].order, 2);
    }

    #[test]
    fn test_non_positive_orders_are_renumbered() {
        let steps = json!([
            {"order": 0, "instruction": "Zeroth."},
            {"order": -3, "instruction": "Negative."}
        ]);
        let collected = collect_steps(&steps);
        assert_eq!(collected[0].order, 1);
        assert_eq!(collected[1].order, 2);
    }

    #[test]
    fn test_payload_ingredients_are_renormalized() {
        let raw = json!({
            "ingredients": ["  Milk ", "milk", "", "Eggs"]
        })
        .to_string();

        let recipe = assemble_recipe(payload_from(&raw), RecipeMetadata::default());
        assert_eq!(recipe.ingredients, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn test_absent_ingredients_stay_empty_not_null() {
        let recipe = assemble_recipe(payload_from(r#"{"title": "Toast"}"#), RecipeMetadata::default());
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_metadata_is_echoed_verbatim() {
        let metadata = RecipeMetadata {
            cuisine: Some("thai".to_string()),
            servings: Some(2),
            dietary_preferences: Some("vegan".to_string()),
            allergies: Some("peanuts".to_string()),
        };
        let recipe = assemble_recipe(payload_from("{}"), metadata.clone());
        assert_eq!(recipe.metadata, metadata);
    }

    #[test]
    fn test_payload_title_must_be_a_string() {
        let recipe = assemble_recipe(payload_from(r#"{"title": 42}"#), RecipeMetadata::default());
        assert_eq!(recipe.title, DEFAULT_TITLE);
    }
}
