mod gemini;
mod stub;

pub use gemini::{GeminiProvider, ModelInfo};
pub use stub::StaticProvider;

use async_trait::async_trait;
use thiserror::Error;

/// One piece of a multimodal completion request
#[derive(Debug, Clone)]
pub enum CompletionPart {
    /// Plain prompt text
    Text(String),
    /// Binary payload such as a fridge photo or PDF
    Blob { mime_type: String, data: Vec<u8> },
}

/// Generation options forwarded to the completion service
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionOptions {
    /// Sampling temperature; the service default applies when unset
    pub temperature: Option<f32>,
}

/// Failures surfaced by a completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service does not recognize the requested model, or the credential
    /// is not permitted to use it
    #[error("Model '{0}' was not found")]
    ModelNotFound(String),

    /// The request could not be sent or the response could not be read
    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status
    #[error("Completion service returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Unified trait over multimodal completion services
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini", "static")
    fn provider_name(&self) -> &str;

    /// Produce a text completion for the given parts
    ///
    /// An empty string is a valid completion: providers hand back whatever
    /// text the service produced without interpreting it.
    async fn generate(
        &self,
        parts: &[CompletionPart],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}
