//! CLI definitions for pagebrief.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagebrief CLI.
#[derive(Parser)]
#[command(name = "pagebrief")]
#[command(about = "Summarize web pages with a chat-completions model")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.pagebrief/config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Summarize a page
    Summarize {
        /// Page URL
        url: String,

        /// Deliver the summary to a new result window instead of replying in place
        #[arg(long)]
        window: bool,

        /// Read the summary aloud
        #[arg(long)]
        speak: bool,
    },

    /// Answer a free-form prompt
    Prompt {
        /// Prompt text
        text: String,

        /// Read the answer aloud
        #[arg(long)]
        speak: bool,
    },

    /// List selectable models
    Models {
        /// Provider to list (default: the saved provider)
        #[arg(long, value_parser = ["openrouter", "openai"])]
        provider: Option<String>,
    },

    /// Show or change saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the saved settings (API key masked)
    Show,

    /// Update saved settings
    Set {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long, value_parser = ["openrouter", "openai"])]
        provider: Option<String>,

        /// Model id; an empty value selects the provider default
        #[arg(long)]
        model: Option<String>,

        /// Summary language (english, spanish, ...)
        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        tts_rate: Option<f32>,

        #[arg(long)]
        tts_pitch: Option<f32>,

        /// Preferred voice name; an empty value picks automatically
        #[arg(long)]
        tts_voice: Option<String>,
    },
}
