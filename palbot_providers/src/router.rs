//! Backend selection and the failure-to-text boundary.
//!
//! The router dispatches over a closed set of backend identifiers read
//! from configuration. Its [`ReplyProvider`] implementation is total:
//! every backend fault is rendered into reply text here, in one place,
//! so a conversation turn never aborts because a backend misbehaved.

use async_trait::async_trait;
use tracing::{info, warn};

use palbot_config::LlmConfig;
use palbot_core::{ChatMessage, ReplyProvider};

use crate::error::ProviderError;
use crate::{AnthropicClient, GenerationParams, HuggingFaceClient, OpenAiClient, resolve_api_key};

/// The closed set of supported backend identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    HuggingFace,
}

impl ProviderKind {
    /// Parse a configured identifier, case-insensitively. Unknown names
    /// yield `None` and land in the router's fallback arm.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            "huggingface" => Some(Self::HuggingFace),
            _ => None,
        }
    }

    /// Human-readable backend name for replies and logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::HuggingFace => "Hugging Face",
        }
    }

    /// Ambient credential variable for this backend.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::HuggingFace => "HF_API_TOKEN",
        }
    }

    /// Model used when the configuration leaves `llm.model` blank.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-3.5-turbo",
            Self::Anthropic => "claude-3-sonnet-20240229",
            Self::HuggingFace => "gpt2",
        }
    }
}

enum Backend {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
    HuggingFace(HuggingFaceClient),
    MissingKey(ProviderKind),
    Unconfigured,
}

/// Dispatches chat requests to the configured backend.
pub struct LlmRouter {
    backend: Backend,
}

impl LlmRouter {
    /// Select and construct the backend named by the `llm` configuration.
    ///
    /// Credentials are resolved once here: a non-empty ambient environment
    /// variable wins over the configured key, and nothing is written back
    /// to the process environment.
    #[must_use]
    pub fn from_config(llm: &LlmConfig) -> Self {
        let backend = ProviderKind::parse(&llm.provider).map_or_else(
            || {
                warn!("Unrecognized LLM provider: '{}'", llm.provider);
                Backend::Unconfigured
            },
            |kind| Self::build_backend(kind, llm),
        );

        Self { backend }
    }

    fn build_backend(kind: ProviderKind, llm: &LlmConfig) -> Backend {
        let params = GenerationParams {
            model: if llm.model.trim().is_empty() {
                kind.default_model().to_string()
            } else {
                llm.model.clone()
            },
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        };

        let ambient = std::env::var(kind.env_var()).ok();
        let api_key = resolve_api_key(&llm.api_key, ambient.as_deref());

        info!(
            "Selected LLM provider: {} (model={})",
            kind.display_name(),
            params.model
        );

        match (kind, api_key) {
            (ProviderKind::OpenAi, Some(key)) => Backend::OpenAi(OpenAiClient::new(key, params)),
            (ProviderKind::Anthropic, Some(key)) => {
                Backend::Anthropic(AnthropicClient::new(key, params))
            }
            (ProviderKind::HuggingFace, key) => {
                Backend::HuggingFace(HuggingFaceClient::new(key, params))
            }
            (kind, None) => Backend::MissingKey(kind),
        }
    }
}

#[async_trait]
impl ReplyProvider for LlmRouter {
    async fn reply(&self, message: &str, history: &[ChatMessage], system_prompt: &str) -> String {
        match &self.backend {
            Backend::OpenAi(client) => render_reply(
                ProviderKind::OpenAi,
                client.chat(message, history, system_prompt).await,
            ),
            Backend::Anthropic(client) => render_reply(
                ProviderKind::Anthropic,
                client.chat(message, history, system_prompt).await,
            ),
            Backend::HuggingFace(client) => render_reply(
                ProviderKind::HuggingFace,
                client.chat(message, history, system_prompt).await,
            ),
            Backend::MissingKey(kind) => render_reply(
                *kind,
                Err(ProviderError::MissingApiKey {
                    provider: kind.display_name(),
                    env_var: kind.env_var(),
                }),
            ),
            Backend::Unconfigured => fallback_reply(message),
        }
    }
}

/// The single point where a backend result becomes reply text.
fn render_reply(kind: ProviderKind, result: Result<String, ProviderError>) -> String {
    match result {
        Ok(text) => text,
        Err(e @ ProviderError::MissingApiKey { .. }) => {
            warn!("{} call degraded: {e}", kind.display_name());
            e.to_string()
        }
        Err(e) => {
            warn!("{} call failed: {e}", kind.display_name());
            format!("{} error: {e}", kind.display_name())
        }
    }
}

/// Reply when no recognized backend is configured.
fn fallback_reply(message: &str) -> String {
    format!(
        "I received your message: '{message}'. Please configure a valid LLM provider in config.json (openai, anthropic, or huggingface)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: &str, api_key: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            model: String::new(),
            api_key: api_key.to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_closed() {
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse(" anthropic "), Some(ProviderKind::Anthropic));
        assert_eq!(
            ProviderKind::parse("HUGGINGFACE"),
            Some(ProviderKind::HuggingFace)
        );
        assert_eq!(ProviderKind::parse("mistral"), None);
        assert_eq!(ProviderKind::parse(""), None);
    }

    #[tokio::test]
    async fn unrecognized_provider_echoes_the_message() {
        let router = LlmRouter::from_config(&llm_config("llama-farm", "key"));

        let reply = router.reply("Hello there", &[], "Be brief.").await;

        assert!(reply.contains("Hello there"));
        assert!(reply.contains("configure a valid LLM provider"));
    }

    #[tokio::test]
    async fn missing_key_yields_instructional_reply() {
        let router = LlmRouter {
            backend: Backend::MissingKey(ProviderKind::OpenAi),
        };

        let reply = router.reply("hi", &[], "Be brief.").await;

        assert!(reply.contains("OpenAI API key is not configured"));
        assert!(reply.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn backend_fault_names_the_backend() {
        let reply = render_reply(
            ProviderKind::Anthropic,
            Err(ProviderError::MalformedResponse(
                "missing content[0].text".to_string(),
            )),
        );

        assert!(reply.starts_with("Anthropic error:"));
        assert!(reply.contains("missing content[0].text"));
    }

    #[test]
    fn huggingface_constructs_without_a_key() {
        let router = LlmRouter::from_config(&llm_config("huggingface", ""));

        match router.backend {
            Backend::HuggingFace(_) => {}
            _ => panic!("expected the Hugging Face backend"),
        }
    }

    #[test]
    fn default_models_per_backend() {
        assert_eq!(ProviderKind::OpenAi.default_model(), "gpt-3.5-turbo");
        assert_eq!(
            ProviderKind::Anthropic.default_model(),
            "claude-3-sonnet-20240229"
        );
        assert_eq!(ProviderKind::HuggingFace.default_model(), "gpt2");
    }
}
