//! Meal planning from fridge photos.
//!
//! Scans uploaded photos or documents of a fridge's contents with Gemini,
//! merges the recognized ingredients with anything the user typed, and asks
//! the model for a structured recipe. Model output is treated as unreliable:
//! malformed completions degrade to sensible defaults instead of failing
//! the request.

pub mod config;
pub mod error;
pub mod model;
pub mod parsing;
pub mod planner;
pub mod prompt;
pub mod providers;
pub mod upload;
pub mod vision;

pub use config::Settings;
pub use error::PlannerError;
pub use model::{Recipe, RecipeMetadata, RecipeStep};
pub use parsing::{extract_json_block, parse_ingredient_list};
pub use planner::{MealPlanner, MealRequest};
pub use providers::{
    CompletionOptions, CompletionPart, CompletionProvider, GeminiProvider, ModelInfo,
    ProviderError, StaticProvider,
};
pub use upload::UploadedAsset;
pub use vision::VisionClient;

/// Plan a meal with settings loaded from file and environment
///
/// Convenience wrapper over [`Settings::load`] and [`MealPlanner::new`] for
/// callers that do not need to hold on to either.
pub async fn plan_meal(request: MealRequest) -> Result<Recipe, PlannerError> {
    let settings = Settings::load()?;
    let planner = MealPlanner::new(&settings)?;
    planner.plan_meal(request).await
}
