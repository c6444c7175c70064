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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use palbot_config::{Config, available_models};
use palbot_conversation::Bot;
use palbot_providers::LlmRouter;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "palbot")]
#[command(about = "palbot personal assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show the loaded configuration and known models
    Info {
        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    path.map_or_else(Config::load, |p| Config::load_from(p))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            model,
            config,
        } => {
            let mut config = load_config(config.as_ref())?;
            info!("Loaded configuration for bot '{}'", config.bot.name);

            if let Some(model) = model {
                config.llm.model = model;
            }

            let router = LlmRouter::from_config(&config.llm);
            let mut bot = Bot::new(config, router)?;

            if let Some(msg) = message {
                let reply = bot.chat(&msg).await?;
                println!("{reply}");
            } else {
                bot.run_interactive().await?;
            }
        }
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Info { config } => {
            let config = load_config(config.as_ref())?;
            println!("Bot: {}", config.bot.name);
            println!("Provider: {}", config.llm.provider);
            println!("Model: {}", config.llm.model);
            println!("Memory capacity: {} turns", config.bot.max_memory_size);
            println!();
            println!("Known models:");
            for (provider, models) in available_models() {
                println!("  {provider}:");
                for model in *models {
                    println!("    - {model}");
                }
            }
        }
        Commands::Version => {
            println!("palbot {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
