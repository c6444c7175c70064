//! Conversation memory management.
//!
//! The memory is an ordered, capacity-bounded record of conversation turns.
//! Appending at capacity evicts the oldest turn, so the retained window is
//! always the most recent `max_size` turns in insertion order.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use palbot_core::{ChatMessage, Role};

/// Errors from memory construction.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// A zero-capacity memory would silently drop every turn, so it is
    /// rejected at construction instead of turning `add` into a no-op.
    #[error("memory capacity must be greater than zero")]
    ZeroCapacity,
}

/// A user turn paired with its immediately following assistant turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// Fixed-capacity conversation history with FIFO eviction.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    messages: VecDeque<ChatMessage>,
    max_size: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConversationMemory {
    /// Create a memory holding at most `max_size` turns.
    pub fn new(max_size: usize) -> Result<Self, MemoryError> {
        if max_size == 0 {
            return Err(MemoryError::ZeroCapacity);
        }
        let now = Utc::now();
        Ok(Self {
            messages: VecDeque::with_capacity(max_size),
            max_size,
            created_at: now,
            updated_at: now,
        })
    }

    /// Append a turn, evicting from the front once capacity is reached.
    pub fn add(&mut self, role: Role, content: impl Into<String>) {
        while self.messages.len() >= self.max_size {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage::new(role, content));
        self.updated_at = Utc::now();
    }

    /// Conversation history, oldest first.
    ///
    /// With `limit`, only the trailing `limit` turns are returned (or fewer
    /// if the history is shorter). The result is a copy; the internal state
    /// cannot be mutated through it.
    #[must_use]
    pub fn history(&self, limit: Option<usize>) -> Vec<ChatMessage> {
        let start = limit.map_or(0, |n| self.messages.len().saturating_sub(n));
        self.messages.iter().skip(start).cloned().collect()
    }

    /// Remove all turns. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }

    /// Current number of retained turns.
    #[must_use]
    pub fn size(&self) -> usize {
        self.messages.len()
    }

    /// Maximum number of turns this memory retains.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Check if the memory holds no turns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last up-to-`n` complete exchanges, oldest pair first.
    ///
    /// Scanning backward from the newest turn, an assistant turn
    /// immediately preceded by a user turn forms an exchange; an assistant
    /// turn without one is skipped. No side effects.
    #[must_use]
    pub fn last_exchanges(&self, n: usize) -> Vec<Exchange> {
        let mut exchanges = VecDeque::new();
        let mut i = self.messages.len();
        while i > 0 && exchanges.len() < n {
            i -= 1;
            if self.messages[i].role == Role::Assistant
                && i > 0
                && self.messages[i - 1].role == Role::User
            {
                exchanges.push_front(Exchange {
                    user: self.messages[i - 1].content.clone(),
                    assistant: self.messages[i].content.clone(),
                });
                i -= 1;
            }
        }
        Vec::from(exchanges)
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last `add` or `clear`.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
