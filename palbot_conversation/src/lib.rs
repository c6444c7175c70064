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

//! Bounded conversation state and the bot orchestrator.
//!
//! # Key Features
//! - Fixed-capacity conversation history with FIFO eviction
//! - Read-only history views (copies, never internal references)
//! - A `Bot` orchestrator wiring configuration, memory, and a provider
//!   into a single `chat(message) -> reply` operation

mod bot;
mod memory;

pub use bot::{Bot, BotError};
pub use memory::{ConversationMemory, Exchange, MemoryError};
