//! Deterministic provider for tests and local runs without API keys.

use std::sync::Mutex;

use async_trait::async_trait;

use super::prompt::Prompt;
use super::{ProviderError, TextGenerator};

/// Provider returning canned text.
///
/// Responses are matched by checking whether the prompt contains a registered
/// substring (case-insensitive); otherwise the default response is used. Every
/// prompt received is recorded.
#[derive(Debug)]
pub struct FakeProvider {
    model: String,
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Create a provider with no canned responses.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            responses: Vec::new(),
            default_response: None,
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Return `response` for prompts containing `prompt_contains`.
    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Return `response` when no registered pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Fail every call with a transport error carrying `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextGenerator for FakeProvider {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let prompt = prompt.combined();
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.clone());

        if let Some(message) = &self.failure {
            return Err(ProviderError::RequestFailed(message.clone()));
        }

        let prompt_lower = prompt.to_lowercase();
        let response = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                ProviderError::RequestFailed(format!(
                    "FakeProvider: no response configured for prompt (first 100 chars): {}",
                    prompt.chars().take(100).collect::<String>()
                ))
            })?;

        if response.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
