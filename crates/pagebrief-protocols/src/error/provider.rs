//! AI client errors.

use thiserror::Error;

/// Message used when the provider gives no usable error text.
pub const GENERIC_API_ERROR: &str = "API Error";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key required. Please save your API key in Settings.")]
    MissingApiKey,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Build an API error from a non-success response body.
    ///
    /// Uses `error.message` from a JSON body when present, otherwise the
    /// generic "API Error" text. Raw bodies are never surfaced.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_API_ERROR.to_string());
        ProviderError::Api { status, message }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
