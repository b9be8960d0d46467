//! Cross-context messages.
//!
//! All messages are JSON objects discriminated by an `action` field, which
//! is the wire shape every execution context (popup, result window,
//! content script, background controller) agrees on.

use serde::{Deserialize, Serialize};

use super::{PageContent, Tab};
use crate::provider::ModelCatalog;

/// Inbound control message (UI surface -> coordinator, or coordinator -> content script).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlMessage {
    /// Summarize the given tab and reply in place.
    SummarizePage { tab: Tab },
    /// Answer a free-form prompt.
    SendCustomPrompt { prompt: String },
    /// Query the model catalog.
    GetModels,
    /// A result surface attached its listener and can receive a result.
    ResultReady,
    /// Ask a content script for the page content.
    GetContent,
}

impl ControlMessage {
    pub fn action(&self) -> &'static str {
        match self {
            ControlMessage::SummarizePage { .. } => "summarizePage",
            ControlMessage::SendCustomPrompt { .. } => "sendCustomPrompt",
            ControlMessage::GetModels => "getModels",
            ControlMessage::ResultReady => "resultReady",
            ControlMessage::GetContent => "getContent",
        }
    }
}

/// Outcome of one request, delivered to a result surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ResultMessage {
    DisplaySummary {
        summary: String,
        title: String,
        url: String,
    },
    DisplayError {
        error: String,
    },
}

impl ResultMessage {
    pub fn summary(summary: impl Into<String>, page: &PageContent) -> Self {
        ResultMessage::DisplaySummary {
            summary: summary.into(),
            title: page.title.clone(),
            url: page.url.clone(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        ResultMessage::DisplayError {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultMessage::DisplayError { .. })
    }

    /// Title and body for a system notification carrying this outcome.
    pub fn notification_text(&self) -> (&'static str, &str) {
        match self {
            ResultMessage::DisplaySummary { summary, .. } => ("AI Summary", summary.as_str()),
            ResultMessage::DisplayError { error } => ("Summarization Failed", error.as_str()),
        }
    }
}

/// Direct reply to a [`ControlMessage`].
///
/// Untagged: the popup distinguishes replies by which fields are present,
/// so variant order matters for deserialization (errors first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlReply {
    Error {
        error: String,
    },
    Summary {
        summary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Content(PageContent),
    Models {
        models: ModelCatalog,
    },
    /// Acknowledgement without payload; serialized as `null`.
    Ack,
}

impl ControlReply {
    pub fn error(error: impl Into<String>) -> Self {
        ControlReply::Error {
            error: error.into(),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
