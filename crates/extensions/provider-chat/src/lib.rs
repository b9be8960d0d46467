//! Chat-completions AI client for pagebrief.
//!
//! Talks to OpenAI or OpenRouter with the same request shape and exposes
//! the built-in model catalog.

mod api;
mod client;
mod models;
mod prompt;

pub use client::ChatClient;
pub use models::builtin_catalog;
pub use prompt::{build_summary_prompt, language_instruction, MAX_PROMPT_TEXT_CHARS};
pub use pagebrief_protocols::sanitize_header_value;
