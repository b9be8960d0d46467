//! Built-in model catalog.

use pagebrief_protocols::provider::{ModelCatalog, ModelEntry};

const OPENROUTER_MODELS: &[(&str, &str)] = &[
    ("google/gemini-3-flash-preview", "Google: Gemini 3 Flash Preview"),
    ("x-ai/grok-4", "Grok 4"),
    ("x-ai/grok-4-fast", "Grok 4 Fast"),
    ("anthropic/claude-opus-4.5", "Claude 4.5 Opus"),
    ("anthropic/claude-haiku-4.5", "Claude 4.5 Haiku"),
    ("anthropic/claude-sonnet-4.5", "Claude 4.5 Sonnet"),
    ("openai/gpt-5.2-chat", "GPT-5.2 Chat"),
    ("openai/gpt-5.2", "GPT-5.2"),
    ("openai/gpt-4o", "GPT-4o"),
    ("openai/gpt-4o-mini", "GPT-4o Mini"),
    ("meta-llama/llama-3.1-405b-instruct", "Llama 3.1 405B"),
    ("meta-llama/llama-3.1-70b-instruct", "Llama 3.1 70B"),
    ("meta-llama/llama-3.1-8b-instruct", "Llama 3.1 8B"),
    ("mistralai/mistral-large-2407", "Mistral Large"),
    ("perplexity/llama-3.1-sonar-large-128k-online", "Perplexity Sonar"),
    ("qwen/qwen-2.5-72b-instruct", "Qwen 2.5 72B"),
    ("deepseek/deepseek-chat", "DeepSeek Chat"),
];

const OPENAI_MODELS: &[(&str, &str)] = &[
    ("gpt-4o", "GPT-4o"),
    ("gpt-4o-mini", "GPT-4o Mini"),
    ("gpt-4-turbo", "GPT-4 Turbo"),
    ("gpt-3.5-turbo", "GPT-3.5 Turbo"),
];

fn entries(list: &[(&str, &str)]) -> Vec<ModelEntry> {
    list.iter().map(|(id, name)| ModelEntry::new(*id, *name)).collect()
}

/// Selectable models per provider, in display order.
pub fn builtin_catalog() -> ModelCatalog {
    ModelCatalog {
        openrouter: entries(OPENROUTER_MODELS),
        openai: entries(OPENAI_MODELS),
    }
}
