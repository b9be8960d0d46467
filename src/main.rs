//! pagebrief - summarize web pages with a chat-completions model.
//!
//! Headless host for the summarization pipeline: pages are fetched over
//! HTTP, settings live in a JSON file, and result windows run in-process.

mod cli;
mod cmd_settings;
mod cmd_summarize;
mod host;
mod logging;

use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};

use pagebrief_config::{Config, ConfigLoader, ConfigValidator, ValidationResult};
use pagebrief_provider_chat::{builtin_catalog, ChatClient};
use pagebrief_runtime::Coordinator;

use crate::cli::{Cli, Commands};
use crate::host::HeadlessPlatform;

pub(crate) type HostCoordinator = Coordinator<HeadlessPlatform, ChatClient>;

fn load_config(cli: &Cli) -> anyhow::Result<(Config, ValidationResult)> {
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    let result = ConfigValidator::ensure_valid(&config)?;
    Ok((config, result))
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let (platform, mut events) = HeadlessPlatform::new(&config)?;
    let summarizer = ChatClient::with_endpoints(config.endpoints.clone());
    let coordinator = Coordinator::new(
        Arc::new(platform),
        Arc::new(summarizer),
        builtin_catalog(),
        &config,
    );

    match cli.command {
        Commands::Summarize { url, window: false, speak } => {
            cmd_summarize::summarize_in_place(&coordinator, &url, speak).await
        }
        Commands::Summarize { url, window: true, speak } => {
            cmd_summarize::summarize_in_window(&coordinator, &mut events, &url, speak).await
        }
        Commands::Prompt { text, speak } => cmd_summarize::prompt(&coordinator, &text, speak).await,
        Commands::Models { provider } => cmd_summarize::models(&coordinator, provider.as_deref()).await,
        Commands::Settings { action } => {
            cmd_settings::handle_settings_command(&coordinator, action).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, validation) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init_tracing(&config.logging) {
        eprintln!("Logging disabled: {:#}", e);
    }
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    if let Err(e) = run(cli, config).await {
        debug!(error = ?e, "Command failed");
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
