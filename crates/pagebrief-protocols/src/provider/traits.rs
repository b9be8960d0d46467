//! AI client trait definition.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{PageContent, Settings};

/// Core trait for the AI client as seen by the coordinator.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a reply for either a page summary or a custom prompt.
    ///
    /// When `custom_prompt` is present it is sent verbatim and `page` is
    /// ignored. Implementations must refuse to issue any request when the
    /// settings carry no usable API key.
    async fn summarize(
        &self,
        settings: &Settings,
        page: Option<&PageContent>,
        custom_prompt: Option<&str>,
    ) -> Result<String, ProviderError>;
}
