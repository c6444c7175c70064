//! Hugging Face text-generation backend.
//!
//! This backend speaks plain text-generation rather than chat: the
//! conversation is flattened into a single prompt with `role: content`
//! lines and a trailing `assistant:` cue, and the reply is whatever the
//! model generated after that cue.

use palbot_core::ChatMessage;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::GenerationParams;
use crate::error::ProviderError;

/// History entries included in the flattened prompt.
const HISTORY_WINDOW: usize = 3;

/// Generation headroom past the prompt's word count.
const RESPONSE_BUDGET: usize = 50;

pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
    params: GenerationParams,
    base_url: String,
}

impl HuggingFaceClient {
    /// The API token is optional; public models serve unauthenticated
    /// requests.
    pub fn new(api_key: Option<String>, params: GenerationParams) -> Self {
        info!("Creating HuggingFaceClient");
        Self {
            client: Client::new(),
            api_key,
            params,
            base_url: "https://api-inference.huggingface.co/models".to_string(),
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
        let prompt = build_prompt(message, history, system_prompt);
        let max_new_tokens = prompt.split_whitespace().count() + RESPONSE_BUDGET;

        let request = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": max_new_tokens,
                "temperature": self.params.temperature,
                "return_full_text": true,
            }
        });

        info!(
            "Sending request to Hugging Face API: model={}",
            self.params.model
        );

        let mut builder = self
            .client
            .post(format!("{}/{}", self.base_url, self.params.model))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let generated = response[0]["generated_text"].as_str().ok_or_else(|| {
            ProviderError::MalformedResponse("missing [0].generated_text".to_string())
        })?;

        Ok(extract_reply(generated))
    }
}

/// System prompt, the last [`HISTORY_WINDOW`] history entries as
/// `role: content` lines, and the `user:`/`assistant:` cue.
fn build_prompt(message: &str, history: &[ChatMessage], system_prompt: &str) -> String {
    let mut prompt = format!("{system_prompt}\n\n");

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for entry in &history[start..] {
        prompt.push_str(&format!("{}: {}\n", entry.role.as_str(), entry.content));
    }

    prompt.push_str(&format!("user: {message}\nassistant:"));
    prompt
}

/// Everything after the last `assistant:` marker, trimmed. Models that
/// echo the prompt keep their continuation after the cue.
fn extract_reply(generated: &str) -> String {
    generated
        .rsplit("assistant:")
        .next()
        .unwrap_or(generated)
        .trim()
        .to_string()
}
