//! Anthropic Messages API backend.
//!
//! Unlike the chat-completion shape, the system prompt travels as a
//! top-level `system` field rather than a message entry.

use palbot_core::ChatMessage;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::GenerationParams;
use crate::error::ProviderError;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    params: GenerationParams,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, params: GenerationParams) -> Self {
        info!("Creating AnthropicClient");
        Self {
            client: Client::new(),
            api_key,
            params,
            base_url: "https://api.anthropic.com".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Request a completion for `message` with the conversation context.
    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        let request = json!({
            "model": self.params.model,
            "max_tokens": self.params.max_tokens,
            "temperature": self.params.temperature,
            "system": system_prompt,
            "messages": build_messages(message, history),
        });

        info!("Sending request to Anthropic API: model={}", self.params.model);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing content[0].text".to_string())
            })?
            .to_string();

        Ok(content)
    }
}

/// User and assistant turns from history, then the current message as the
/// final user entry. The system prompt is not part of the sequence.
fn build_messages(message: &str, history: &[ChatMessage]) -> Vec<serde_json::Value> {
    let mut messages: Vec<serde_json::Value> = history
        .iter()
        .map(|entry| json!({"role": entry.role.as_str(), "content": entry.content}))
        .collect();

    messages.push(json!({"role": "user", "content": message}));

    messages
}
