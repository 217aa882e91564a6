mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::message::{self, MessageCommandArgs};
use crate::config::{AppConfig, LlmProvider};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::GeminiClient;
use crate::services::LanguageModelService;

#[derive(Parser)]
#[command(name = "murmur", author, version, about = "AI commit message generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a commit message from the staged changes.
    Message(MessageArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct MessageArgs {
    /// Override the configured max-token limit for the generated message.
    #[arg(short, long)]
    max_tokens: Option<u32>,
    /// Path to the repository (defaults to the current directory).
    #[arg(short, long)]
    repo: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Message(args) => run_message(args).await,
    }
}

async fn run_message(args: MessageArgs) -> AppResult<()> {
    let workspace_root = match args.repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let config = AppConfig::load(&workspace_root)?;

    if config.gemini_api_key.is_none() {
        eprintln!("Warning: Gemini API key not configured; message generation will fail.");
    }

    let language_model: Arc<dyn LanguageModelService> = match &config.llm_provider {
        LlmProvider::Gemini => Arc::new(
            GeminiClient::connect(config.gemini_api_key.clone(), config.gemini_model.clone())
                .await?,
        ),
        LlmProvider::Custom(provider) => {
            eprintln!(
                "Warning: custom LLM provider '{provider}' not yet implemented, using Gemini fallback."
            );
            Arc::new(
                GeminiClient::connect(config.gemini_api_key.clone(), config.gemini_model.clone())
                    .await?,
            )
        }
    };

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));

    let context = AppContext::new(config, git, language_model);

    let outcome = message::run(
        &context,
        MessageCommandArgs {
            max_tokens: args.max_tokens,
        },
    )
    .await?;

    println!("{outcome}");

    Ok(())
}
