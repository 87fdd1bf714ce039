use log::error;

use crate::config::Settings;
use crate::error::PlannerError;
use crate::model::RecipeMetadata;
use crate::prompt;
use crate::providers::{
    CompletionOptions, CompletionPart, CompletionProvider, GeminiProvider, ProviderError,
};

/// Binds the meal-planning prompts to a completion provider
pub struct VisionClient {
    provider: Box<dyn CompletionProvider>,
    model: String,
    max_ingredients: u32,
    temperature: f32,
}

impl VisionClient {
    /// Create a client backed by the live Gemini service
    ///
    /// Fails fast when no API key is configured, before any request is made.
    pub fn new(settings: &Settings) -> Result<Self, PlannerError> {
        let provider = GeminiProvider::new(settings)?;
        Ok(Self::with_provider(settings, Box::new(provider)))
    }

    /// Create a client over any completion provider
    pub fn with_provider(settings: &Settings, provider: Box<dyn CompletionProvider>) -> Self {
        VisionClient {
            provider,
            model: settings.model.clone(),
            max_ingredients: settings.max_ingredients,
            temperature: settings.temperature,
        }
    }

    /// Ask the model to identify ingredients in an uploaded photo or PDF
    ///
    /// Returns the raw completion text; decoding it is the caller's concern.
    pub async fn extract_ingredients(
        &self,
        file_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, PlannerError> {
        let parts = [
            CompletionPart::Blob {
                mime_type: mime_type.to_string(),
                data: file_bytes.to_vec(),
            },
            CompletionPart::Text(prompt::ingredient_prompt(self.max_ingredients)),
        ];

        self.provider
            .generate(&parts, &CompletionOptions::default())
            .await
            .map_err(|err| self.service_error("ingredient extraction", err))
    }

    /// Ask the model to author a recipe over the given ingredients
    ///
    /// # Errors
    /// Returns [`PlannerError::EmptyIngredients`] before any request when the
    /// ingredient list is empty, or [`PlannerError::Service`] when the
    /// completion service fails.
    pub async fn generate_recipe(
        &self,
        ingredients: &[String],
        constraints: &RecipeMetadata,
        variety_hint: Option<&str>,
    ) -> Result<String, PlannerError> {
        if ingredients.is_empty() {
            return Err(PlannerError::EmptyIngredients);
        }

        let parts = [CompletionPart::Text(prompt::recipe_prompt(
            ingredients,
            constraints,
            variety_hint,
        ))];
        let options = CompletionOptions {
            temperature: Some(self.temperature),
        };

        self.provider
            .generate(&parts, &options)
            .await
            .map_err(|err| self.service_error("recipe generation", err))
    }

    /// Map a provider failure to a message safe to show to users
    fn service_error(&self, operation: &str, err: ProviderError) -> PlannerError {
        error!("Gemini {operation} failed: {err}");
        let message = match err {
            ProviderError::ModelNotFound(_) => format!(
                "Gemini model '{}' is unavailable for this key. \
                 Check that the model name is current and that the API key may use it; \
                 the models listing shows valid names.",
                self.model
            ),
            _ => "Gemini service is temporarily unavailable. Try again in a moment.".to_string(),
        };
        PlannerError::Service(message)
    }
}
