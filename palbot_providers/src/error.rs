use thiserror::Error;

/// Failures at the backend-call boundary.
///
/// These never cross the [`crate::LlmRouter`] seam as errors; the router
/// renders them into reply text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(
        "{provider} API key is not configured. Set llm.api_key in config.json or the {env_var} environment variable."
    )]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response format: {0}")]
    MalformedResponse(String),
}
