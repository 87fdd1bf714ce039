use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::PlannerError;
use crate::providers::{CompletionOptions, CompletionPart, CompletionProvider, ProviderError};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini generative language API
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider from settings
    pub fn new(settings: &Settings) -> Result<Self, PlannerError> {
        // Try settings first, then fall back to environment variable
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                PlannerError::Config(
                    "GEMINI_API_KEY not found in settings or environment".to_string(),
                )
            })?;

        Ok(GeminiProvider {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: settings.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GeminiProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// List the models this credential can call with generateContent
    ///
    /// Handy when the configured model is rejected: the returned names are
    /// valid values for the `model` setting.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let listing: ModelListing = response.json().await?;
        Ok(listing
            .models
            .into_iter()
            .filter(|model| {
                model
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .collect())
    }

    fn render_parts(parts: &[CompletionPart]) -> Vec<Value> {
        parts
            .iter()
            .map(|part| match part {
                CompletionPart::Text(text) => json!({ "text": text }),
                CompletionPart::Blob { mime_type, data } => json!({
                    "inline_data": {
                        "mime_type": mime_type,
                        "data": STANDARD.encode(data),
                    }
                }),
            })
            .collect()
    }
}

/// One model advertised by the Gemini API
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Fully qualified name, e.g. "models/gemini-1.5-flash"
    pub name: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelListing {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        parts: &[CompletionPart],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut body = json!({
            "contents": [{
                "parts": Self::render_parts(parts)
            }]
        });
        if let Some(temperature) = options.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::ModelNotFound(self.model.clone()));
        }
        if !status.is_success() {
            let message = response.text().await?;
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        // Missing or empty candidate text is a valid (empty) completion
        Ok(response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string())
    }
}
