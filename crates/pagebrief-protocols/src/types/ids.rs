//! Identities of browser tabs and UI surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

/// Identifier of a UI surface (a result window's tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab:{}", self.0)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// A browser tab as seen by the popup when it asks for a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Tab {
    pub fn new(id: u64) -> Self {
        Self {
            id: TabId(id),
            url: None,
            title: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// The context an inbound message came from.
///
/// A `resultReady` signal is keyed by its sender's surface, so the
/// coordinator can tell which result window attached its listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageSender {
    pub surface: Option<SurfaceId>,
    pub tab: Option<TabId>,
}

impl MessageSender {
    pub fn surface(id: SurfaceId) -> Self {
        Self {
            surface: Some(id),
            tab: None,
        }
    }

    pub fn tab(id: TabId) -> Self {
        Self {
            surface: None,
            tab: Some(id),
        }
    }

    /// Sender with no known identity (e.g. the popup).
    pub fn unknown() -> Self {
        Self::default()
    }
}
