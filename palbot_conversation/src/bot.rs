//! Bot orchestrator for multi-turn dialogue.
//!
//! The `Bot` wires configuration, conversation memory, and a reply
//! provider into a single `chat(message) -> reply` operation, and drives
//! the interactive read loop.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use palbot_config::Config;
use palbot_core::{ReplyProvider, Role};

use crate::memory::{ConversationMemory, Exchange, MemoryError};

/// Errors that can occur while running the bot.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("message is empty")]
    EmptyMessage,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversational assistant over a single bounded conversation stream.
///
/// One `Bot` owns exactly one memory and one configuration; a turn runs to
/// completion (including the backend call) before the next is accepted.
pub struct Bot<P>
where
    P: Send + Sync,
{
    provider: P,
    memory: ConversationMemory,
    config: Config,
    conversation_id: Uuid,
}

impl<P> Bot<P>
where
    P: ReplyProvider + Send + Sync,
{
    /// Create a bot from a loaded configuration and a reply provider.
    pub fn new(config: Config, provider: P) -> Result<Self, BotError> {
        let memory = ConversationMemory::new(config.bot.max_memory_size)?;
        let conversation_id = Uuid::now_v7();
        info!(
            "Created bot '{}' (conversation {conversation_id}, memory capacity {})",
            config.bot.name, config.bot.max_memory_size
        );
        Ok(Self {
            provider,
            memory,
            config,
            conversation_id,
        })
    }

    /// Send a message to the bot and get a reply.
    ///
    /// Records the user turn, forwards the message and the preceding
    /// history to the provider, records the reply as an assistant turn, and
    /// returns it. The provider appends the current message into its own
    /// request shape, so the history it receives stops before this turn.
    pub async fn chat(&mut self, message: &str) -> Result<String, BotError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(BotError::EmptyMessage);
        }

        let turn = self.memory.size() / 2 + 1;
        info!(
            "Processing turn {turn} for conversation {}",
            self.conversation_id
        );

        self.memory.add(Role::User, message);
        let mut history = self.memory.history(None);
        history.pop();

        let reply = self
            .provider
            .reply(message, &history, &self.config.bot.system_prompt)
            .await;

        self.memory.add(Role::Assistant, reply.clone());
        debug!("Turn {turn} completed ({} turns retained)", self.memory.size());

        Ok(reply)
    }

    /// Clear the conversation memory. Capacity is unchanged.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
        info!("Cleared memory for conversation {}", self.conversation_id);
    }

    /// The loaded configuration (read-only).
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current number of retained turns.
    #[must_use]
    pub fn memory_size(&self) -> usize {
        self.memory.size()
    }

    /// The last up-to-`n` complete exchanges, oldest pair first.
    #[must_use]
    pub fn last_exchanges(&self, n: usize) -> Vec<Exchange> {
        self.memory.last_exchanges(n)
    }

    /// Identifier for this conversation stream, used in logs.
    #[must_use]
    pub const fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Run the interactive conversation loop.
    ///
    /// Reads lines from stdin until `quit`/`exit` (case-insensitive) or
    /// EOF. Blank input is ignored. A failed turn is reported and the loop
    /// continues.
    pub async fn run_interactive(&mut self) -> Result<(), BotError> {
        println!("Welcome to {}!", self.config.bot.name);
        println!("Type 'quit' or 'exit' to end the conversation.\n");

        loop {
            print!("You: ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            if std::io::stdin().read_line(&mut input)? == 0 {
                println!("\nGoodbye!");
                break;
            }
            let input = input.trim();

            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
                println!("Goodbye!");
                break;
            }

            if input.is_empty() {
                continue;
            }

            match self.chat(input).await {
                Ok(reply) => println!("\n{}: {reply}\n", self.config.bot.name),
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use palbot_config::{BotConfig, LlmConfig};
    use palbot_core::ChatMessage;
    use std::sync::Mutex;

    struct StubProvider {
        reply: String,
        seen_history: Mutex<Vec<ChatMessage>>,
    }

    impl StubProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen_history: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReplyProvider for StubProvider {
        async fn reply(
            &self,
            _message: &str,
            history: &[ChatMessage],
            _system_prompt: &str,
        ) -> String {
            if let Ok(mut seen) = self.seen_history.lock() {
                *seen = history.to_vec();
            }
            self.reply.clone()
        }
    }

    fn test_config(max_memory_size: usize) -> Config {
        Config {
            bot: BotConfig {
                name: "TestBot".to_string(),
                system_prompt: "You are a test bot.".to_string(),
                max_memory_size,
            },
            llm: LlmConfig {
                provider: "openai".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                api_key: String::new(),
                temperature: 0.7,
                max_tokens: 500,
            },
        }
    }

    #[tokio::test]
    async fn chat_records_one_user_and_one_assistant_turn() {
        let mut bot = Bot::new(test_config(10), StubProvider::new("Hi there!"))
            .unwrap_or_else(|e| panic!("bot construction failed: {e}"));

        let before = bot.memory_size();
        let reply = bot.chat("Hello").await.unwrap_or_default();

        assert_eq!(reply, "Hi there!");
        assert!(!reply.is_empty());
        assert_eq!(bot.memory_size(), before + 2);

        let exchanges = bot.last_exchanges(1);
        assert_eq!(exchanges[0].user, "Hello");
        assert_eq!(exchanges[0].assistant, "Hi there!");
    }

    #[tokio::test]
    async fn provider_history_excludes_current_message() {
        let mut bot = Bot::new(test_config(10), StubProvider::new("ok"))
            .unwrap_or_else(|e| panic!("bot construction failed: {e}"));

        let _ = bot.chat("first").await;
        let _ = bot.chat("second").await;

        let seen = bot
            .provider
            .seen_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].content, "first");
        assert_eq!(seen[1].content, "ok");
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let mut bot = Bot::new(test_config(10), StubProvider::new("ok"))
            .unwrap_or_else(|e| panic!("bot construction failed: {e}"));

        assert!(matches!(bot.chat("   ").await, Err(BotError::EmptyMessage)));
        assert_eq!(bot.memory_size(), 0);
    }

    #[tokio::test]
    async fn clear_memory_empties_history() {
        let mut bot = Bot::new(test_config(10), StubProvider::new("ok"))
            .unwrap_or_else(|e| panic!("bot construction failed: {e}"));

        let _ = bot.chat("Hello").await;
        assert_eq!(bot.memory_size(), 2);

        bot.clear_memory();
        assert_eq!(bot.memory_size(), 0);
    }

    #[test]
    fn zero_memory_capacity_is_a_construction_error() {
        let result = Bot::new(test_config(0), StubProvider::new("ok"));
        assert!(matches!(result, Err(BotError::Memory(_))));
    }
}
