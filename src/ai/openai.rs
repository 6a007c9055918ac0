//! OpenAI chat-completions provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::{AiConfig, GenerationOptions};
use super::prompt::Prompt;
use super::{ProviderError, TextGenerator, api_error};

#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    options: GenerationOptions,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, config: &AiConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            options: config.options,
            client,
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Pull the first choice's text out of a completion response body.
fn extract_content(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(content)
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;

        log::debug!("Calling OpenAI model {}", self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        extract_content(&body)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> OpenAiProvider {
        let config = AiConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => api_key.map(str::to_string),
            "OPENAI_BASE_URL" => Some("http://localhost:9/v1/".to_string()),
            _ => None,
        });
        OpenAiProvider::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn request_body_carries_generation_options() {
        let provider = provider(Some("sk-test"));
        let prompt = Prompt::new("Follow the rules", "Make a banner");
        let body = serde_json::to_value(provider.request_body(&prompt)).expect("json");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Follow the rules");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Make a banner");
        assert_eq!(provider.base_url, "http://localhost:9/v1");
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "{\"recipe\": []}"}}]}"#;
        assert_eq!(extract_content(body).ok().as_deref(), Some("{\"recipe\": []}"));
    }

    #[test]
    fn extract_content_rejects_empty_and_garbled_bodies() {
        assert!(matches!(
            extract_content(r#"{"choices": []}"#),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            extract_content(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            extract_content("<html>gateway timeout</html>"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[actix_web::test]
    async fn missing_api_key_fails_without_network() {
        let provider = provider(None);
        assert!(matches!(
            provider.generate(&Prompt::new("", "anything")).await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
