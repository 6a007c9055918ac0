use serde::Deserialize;
use validator::Validate;

use crate::ai::ProviderKind;

/// Longest user message accepted by the chat endpoint.
pub const MESSAGE_MAX_LEN: u64 = 4000;

/// JSON body of a chat request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    /// Free-text description of the product to make.
    #[validate(length(min = 1, max = MESSAGE_MAX_LEN))]
    pub message: String,
    /// Conversation identifier; a new one is generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Backend used to draft the recipe.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Product code to use when the provider does not name one.
    #[serde(default)]
    pub product_code: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            provider: ProviderKind::default(),
            product_code: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = Some(product_code.into());
        self
    }
}
