//! Platform capability protocol.
//!
//! The coordinator never talks to a browser API directly. Everything it
//! needs from the host extension platform goes through this capability set,
//! so callback-style and promise-style platforms are adapted once, in
//! their `Platform` implementation, and the pipeline exists only once.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::types::{PageContent, ResultMessage, StorageRecord, SurfaceId, Tab};

/// Capabilities the coordinator consumes from the host platform.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Send a result message to a surface.
    ///
    /// Fails with [`PlatformError::NoReceiver`] while the surface has not
    /// attached its listener yet.
    async fn send_message(
        &self,
        surface: SurfaceId,
        message: &ResultMessage,
    ) -> Result<(), PlatformError>;

    /// Open a dedicated result window and return its identity.
    ///
    /// Returning does not mean the surface can receive messages yet.
    async fn create_result_surface(&self, width: u32, height: u32)
        -> Result<SurfaceId, PlatformError>;

    /// One-shot code injection into the tab, returning the extraction result.
    async fn inject_and_extract(&self, tab: &Tab) -> Result<PageContent, PlatformError>;

    /// Ask the tab's persistent content script (`getContent`) for the page.
    async fn request_content(&self, tab: &Tab) -> Result<PageContent, PlatformError>;

    /// Read the given keys from the key-value store. Missing keys are absent.
    async fn get_storage(&self, keys: &[&str]) -> Result<StorageRecord, PlatformError>;

    /// Merge the record into the key-value store (last write wins).
    async fn set_storage(&self, values: StorageRecord) -> Result<(), PlatformError>;

    /// Raise a user-visible system notification.
    async fn notify(&self, title: &str, message: &str) -> Result<(), PlatformError>;
}
