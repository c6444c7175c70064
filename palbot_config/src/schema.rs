use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub bot: BotConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    pub name: String,
    pub system_prompt: String,
    pub max_memory_size: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "LlmConfig::default_max_tokens")]
    pub max_tokens: u32,
}

impl LlmConfig {
    const fn default_temperature() -> f32 {
        0.7
    }

    const fn default_max_tokens() -> u32 {
        500
    }
}

impl Config {
    /// Load the configuration from `~/palbot/config.json`.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'palbot init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Path of the default configuration file.
    pub fn default_config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("palbot");

        Ok(config_dir.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("palbot");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "bot": {
    "name": "PalBot",
    "system_prompt": "You are a helpful personal assistant. Provide clear, concise responses.",
    "max_memory_size": 100
  },
  "llm": {
    "provider": "openai",
    "model": "gpt-3.5-turbo",
    "api_key": "your-api-key-here",
    "temperature": 0.7,
    "max_tokens": 500
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your API key");
        println!("   2. Pick a provider: openai, anthropic, or huggingface");
        println!("   3. Run 'palbot chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - llm.provider: backend to use (openai, anthropic, huggingface)");
        println!("   - llm.model: model name; run 'palbot info' to list known models");
        println!("   - bot.max_memory_size: number of turns kept as conversation context");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let content = r#"{
            "bot": {
                "name": "PalBot",
                "system_prompt": "Be helpful.",
                "max_memory_size": 50
            },
            "llm": {
                "provider": "anthropic",
                "model": "claude-3-sonnet-20240229",
                "api_key": "key-123",
                "temperature": 0.5,
                "max_tokens": 800
            }
        }"#;

        let config: Config = match serde_json::from_str(content) {
            Ok(c) => c,
            Err(e) => panic!("valid config rejected: {e}"),
        };
        assert_eq!(config.bot.name, "PalBot");
        assert_eq!(config.bot.max_memory_size, 50);
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.max_tokens, 800);
    }

    #[test]
    fn llm_fields_have_defaults() {
        let content = r#"{
            "bot": {
                "name": "PalBot",
                "system_prompt": "Be helpful.",
                "max_memory_size": 50
            },
            "llm": {
                "provider": "openai",
                "model": "gpt-3.5-turbo"
            }
        }"#;

        let config: Config = match serde_json::from_str(content) {
            Ok(c) => c,
            Err(e) => panic!("valid config rejected: {e}"),
        };
        assert_eq!(config.llm.api_key, "");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 500);
    }

    #[test]
    fn missing_top_level_key_is_an_error() {
        let missing_llm = r#"{
            "bot": {
                "name": "PalBot",
                "system_prompt": "Be helpful.",
                "max_memory_size": 50
            }
        }"#;
        assert!(serde_json::from_str::<Config>(missing_llm).is_err());

        let missing_bot = r#"{
            "llm": { "provider": "openai", "model": "gpt-3.5-turbo" }
        }"#;
        assert!(serde_json::from_str::<Config>(missing_bot).is_err());
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/palbot/config.json");
        assert!(Config::load_from(path).is_err());
    }
}
