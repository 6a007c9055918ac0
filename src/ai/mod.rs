//! Text-generation providers used to draft recipes.
//!
//! Two HTTP backends share the [`TextGenerator`] contract; requests pick one
//! of them with a [`ProviderKind`]. There is no retry and no fallback between
//! providers: a failed call fails the request.

pub mod anthropic;
pub mod config;
pub mod fake;
pub mod openai;
pub mod prompt;

pub use anthropic::AnthropicProvider;
pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::config::AiConfig;
use self::prompt::Prompt;

/// Failures talking to a text-generation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("provider returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// A backend that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Send `prompt` and return the generated text.
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError>;

    /// Short provider identifier used in logs.
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Backend selector carried by each chat request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    #[serde(alias = "anthropic")]
    Claude,
}

/// The two configured backends.
#[derive(Debug, Clone)]
pub struct AiProviders {
    openai: Arc<dyn TextGenerator>,
    claude: Arc<dyn TextGenerator>,
}

impl AiProviders {
    pub fn new(openai: Arc<dyn TextGenerator>, claude: Arc<dyn TextGenerator>) -> Self {
        Self { openai, claude }
    }

    /// Build both HTTP providers from `config`, sharing one HTTP client.
    pub fn from_config(config: &AiConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            openai: Arc::new(OpenAiProvider::new(client.clone(), config)),
            claude: Arc::new(AnthropicProvider::new(client, config)),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> &dyn TextGenerator {
        match kind {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Claude => self.claude.as_ref(),
        }
    }
}

/// Error body shared by both backends: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Turn a non-success response body into [`ProviderError::Api`].
fn api_error(status: u16, body: String) -> ProviderError {
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body,
    };
    ProviderError::Api { status, message }
}
