#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! LLM backend clients and provider dispatch.
//!
//! Each backend owns its own message-shape translation and returns a
//! typed result; the [`LlmRouter`] selects one backend from configuration
//! and is the single place where failures become user-facing reply text.

mod anthropic;
mod credentials;
mod error;
mod huggingface;
mod openai;
mod router;

pub use anthropic::AnthropicClient;
pub use credentials::resolve_api_key;
pub use error::ProviderError;
pub use huggingface::HuggingFaceClient;
pub use openai::OpenAiClient;
pub use router::{LlmRouter, ProviderKind};

/// Sampling parameters shared by all backends, read from the `llm`
/// configuration once at router construction.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}
