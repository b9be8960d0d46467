//! Headless host platform.
//!
//! Tabs are plain URLs fetched over HTTP, storage is a JSON file, result
//! windows are in-process tasks, and notifications go to the desktop.

mod speech;
mod storage;
mod surfaces;

pub(crate) use speech::ProcessSpeech;
pub(crate) use storage::JsonStore;
pub(crate) use surfaces::{SurfaceEvent, SurfaceHost};

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use pagebrief_config::{Config, ConfigLoader};
use pagebrief_notify_desktop::DesktopNotifier;
use pagebrief_page_extractor::PageLoader;
use pagebrief_protocols::error::PlatformError;
use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::types::{PageContent, ResultMessage, StorageRecord, SurfaceId, Tab};

/// Delay before a new window's listener attaches.
pub(crate) const WINDOW_ATTACH_DELAY: Duration = Duration::from_millis(150);

pub(crate) struct HeadlessPlatform {
    loader: PageLoader,
    store: JsonStore,
    surfaces: SurfaceHost,
    notifier: DesktopNotifier,
}

impl HeadlessPlatform {
    pub fn new(
        config: &Config,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SurfaceEvent>), PlatformError> {
        Ok(Self::with_parts(
            PageLoader::new()?,
            JsonStore::new(ConfigLoader::expand_path(&config.storage.path)),
            DesktopNotifier::new(env!("CARGO_PKG_NAME")),
            WINDOW_ATTACH_DELAY,
        ))
    }

    pub fn with_parts(
        loader: PageLoader,
        store: JsonStore,
        notifier: DesktopNotifier,
        attach_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SurfaceEvent>) {
        let (surfaces, events) = SurfaceHost::new(attach_delay);
        let platform = Self {
            loader,
            store,
            surfaces,
            notifier,
        };
        (platform, events)
    }

    pub fn surfaces(&self) -> &SurfaceHost {
        &self.surfaces
    }

    async fn load_tab(&self, tab: &Tab) -> Result<PageContent, PlatformError> {
        let url = tab
            .url
            .as_deref()
            .ok_or_else(|| PlatformError::TabUnreachable(format!("{} has no URL", tab.id)))?;
        self.loader.load(url).await
    }
}

#[async_trait]
impl Platform for HeadlessPlatform {
    async fn send_message(
        &self,
        surface: SurfaceId,
        message: &ResultMessage,
    ) -> Result<(), PlatformError> {
        self.surfaces.send(surface, message)
    }

    async fn create_result_surface(
        &self,
        width: u32,
        height: u32,
    ) -> Result<SurfaceId, PlatformError> {
        Ok(self.surfaces.open(width, height))
    }

    async fn inject_and_extract(&self, tab: &Tab) -> Result<PageContent, PlatformError> {
        debug!(tab = %tab.id, "Extracting page");
        self.load_tab(tab).await
    }

    async fn request_content(&self, tab: &Tab) -> Result<PageContent, PlatformError> {
        debug!(tab = %tab.id, "Asking content script for page");
        self.load_tab(tab).await
    }

    async fn get_storage(&self, keys: &[&str]) -> Result<StorageRecord, PlatformError> {
        self.store.get(keys).await
    }

    async fn set_storage(&self, values: StorageRecord) -> Result<(), PlatformError> {
        self.store.set(values).await
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), PlatformError> {
        let channel = self.notifier.notify(title, message).await?;
        debug!(channel = channel.as_str(), "Notification raised");
        Ok(())
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
