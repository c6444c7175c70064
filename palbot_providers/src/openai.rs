//! OpenAI chat-completion backend.

use palbot_core::ChatMessage;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::GenerationParams;
use crate::error::ProviderError;

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    params: GenerationParams,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, params: GenerationParams) -> Self {
        info!("Creating OpenAiClient");
        Self {
            client: Client::new(),
            api_key,
            params,
            base_url: "https://api.openai.com/v1".to_string(),
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
            "messages": build_messages(message, history, system_prompt),
            "temperature": self.params.temperature,
            "max_tokens": self.params.max_tokens,
        });

        info!("Sending request to OpenAI API: model={}", self.params.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
            })?
            .to_string();

        Ok(content)
    }
}

/// The system prompt leads the sequence, history follows verbatim, and the
/// current message is the final user entry.
fn build_messages(
    message: &str,
    history: &[ChatMessage],
    system_prompt: &str,
) -> Vec<serde_json::Value> {
    let mut messages = vec![json!({"role": "system", "content": system_prompt})];

    for entry in history {
        messages.push(json!({"role": entry.role.as_str(), "content": entry.content}));
    }

    messages.push(json!({"role": "user", "content": message}));

    messages
}
