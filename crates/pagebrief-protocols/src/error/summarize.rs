//! Summarization pipeline errors.
//!
//! One enum carries the whole failure taxonomy of a request. Everything except
//! [`SummarizeError::MissingApiKey`] is routed to the target surface as a
//! `displayError` outcome instead of escaping the coordinator.

use thiserror::Error;

use super::ProviderError;

/// Coarse classification of a [`SummarizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Extraction,
    Network,
    Provider,
    Delivery,
    InvalidRequest,
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("API key required. Please save your API key in Settings.")]
    MissingApiKey,

    #[error("Could not read page content: {0}")]
    Extraction(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    #[error("Result could not be delivered: {0}")]
    Delivery(String),

    #[error("{0}")]
    InvalidRequest(String),
}

impl SummarizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SummarizeError::MissingApiKey => ErrorKind::Config,
            SummarizeError::Extraction(_) => ErrorKind::Extraction,
            SummarizeError::Network(_) => ErrorKind::Network,
            SummarizeError::Provider { .. } => ErrorKind::Provider,
            SummarizeError::Delivery(_) => ErrorKind::Delivery,
            SummarizeError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}

impl From<ProviderError> for SummarizeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey => SummarizeError::MissingApiKey,
            ProviderError::Network(msg) => SummarizeError::Network(msg),
            ProviderError::Api { status, message } => SummarizeError::Provider {
                status: Some(status),
                message,
            },
            ProviderError::InvalidResponse(msg) => SummarizeError::Provider {
                status: None,
                message: msg,
            },
        }
    }
}
