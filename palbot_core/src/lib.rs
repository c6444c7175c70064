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

//! Shared types for the palbot assistant.
//!
//! This crate defines the conversation turn types exchanged between the
//! memory, the provider backends, and the orchestrator, plus the
//! [`ReplyProvider`] trait that separates the orchestrator from the
//! concrete backend wiring.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker role for a conversation turn.
///
/// Serialized lowercase (`"user"` / `"assistant"`) to match the message
/// shape the chat-completion backends expect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Lowercase wire label for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message attributed to a single speaker role.
///
/// Immutable once created; the memory hands out copies, never views into
/// its own storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Provider seam between the orchestrator and the backend wiring.
///
/// `reply` is total: backend-level failures (transport, auth, malformed
/// responses, missing credentials) are rendered into a user-facing text
/// reply by the implementation. The conversation turn never aborts because
/// a backend misbehaved.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Produce a reply to `message` given the conversation so far.
    ///
    /// `history` is oldest-first and does not include `message`; each
    /// backend appends the current message into its own request shape.
    async fn reply(&self, message: &str, history: &[ChatMessage], system_prompt: &str) -> String;
}
