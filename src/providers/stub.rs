use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::providers::{CompletionOptions, CompletionPart, CompletionProvider, ProviderError};

/// Canned-response provider for tests and credential-less environments
///
/// Responses are handed out in the order given; once the queue is empty,
/// further calls produce empty completions.
#[derive(Debug, Default)]
pub struct StaticProvider {
    responses: Mutex<VecDeque<String>>,
}

impl StaticProvider {
    /// Queue a sequence of completions
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticProvider {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }

    /// Queue a single completion
    pub fn single(response: impl Into<String>) -> Self {
        Self::new([response.into()])
    }
}

#[async_trait]
impl CompletionProvider for StaticProvider {
    fn provider_name(&self) -> &str {
        "static"
    }

    async fn generate(
        &self,
        _parts: &[CompletionPart],
        _options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(responses.pop_front().unwrap_or_default())
    }
}
