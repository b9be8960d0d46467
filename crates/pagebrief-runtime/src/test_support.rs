//! In-memory fakes that record every side effect.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use pagebrief_protocols::error::{PlatformError, ProviderError};
use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::provider::Summarizer;
use pagebrief_protocols::types::{
    PageContent, ResultMessage, Settings, StorageRecord, SurfaceId, Tab, TabId, KEY_API_KEY,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CreateSurface(SurfaceId),
    Inject(TabId),
    RequestContent(TabId),
    SendFailed(SurfaceId),
    Sent(SurfaceId, ResultMessage),
    Notify(String, String),
}

/// How a fake surface's listener comes up.
#[derive(Debug, Clone, Copy)]
pub enum Listener {
    /// Attached only through [`FakePlatform::attach`].
    Manual,
    /// Attached after this many failed sends.
    AfterFailures(u32),
    /// Never attached.
    Never,
}

pub struct FakePlatform {
    events: Mutex<Vec<Event>>,
    storage: Mutex<StorageRecord>,
    attached: Mutex<HashSet<SurfaceId>>,
    listener: Listener,
    failed_sends: AtomicU32,
    next_surface: AtomicU64,
    page: Result<PageContent, String>,
    surface_creation_fails: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            storage: Mutex::new(StorageRecord::new()),
            attached: Mutex::new(HashSet::new()),
            listener: Listener::AfterFailures(0),
            failed_sends: AtomicU32::new(0),
            next_surface: AtomicU64::new(1),
            page: Ok(PageContent::new("Ex", "https://ex.com", "hello world")),
            surface_creation_fails: false,
        }
    }

    pub fn with_api_key(self, key: &str) -> Self {
        self.storage.lock().insert(KEY_API_KEY.into(), key.into());
        self
    }

    pub fn with_setting(self, key: &str, value: serde_json::Value) -> Self {
        self.storage.lock().insert(key.into(), value);
        self
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_extraction_error(mut self, message: &str) -> Self {
        self.page = Err(message.to_string());
        self
    }

    pub fn with_failing_surface_creation(mut self) -> Self {
        self.surface_creation_fails = true;
        self
    }

    pub fn attach(&self, surface: SurfaceId) {
        self.attached.lock().insert(surface);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn sent(&self) -> Vec<(SurfaceId, ResultMessage)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Sent(s, m) => Some((s, m)),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(t, m) => Some((t, m)),
                _ => None,
            })
            .collect()
    }

    pub fn extractions(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Inject(_) | Event::RequestContent(_)))
            .count()
    }

    pub fn surfaces_created(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::CreateSurface(_)))
            .count()
    }

    fn record(&self, event: Event) {
        self.events.lock().push(event);
    }

    fn extraction_result(&self) -> Result<PageContent, PlatformError> {
        self.page
            .clone()
            .map_err(PlatformError::TabUnreachable)
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn send_message(
        &self,
        surface: SurfaceId,
        message: &ResultMessage,
    ) -> Result<(), PlatformError> {
        if let Listener::AfterFailures(n) = self.listener {
            if self.failed_sends.load(Ordering::SeqCst) >= n {
                self.attach(surface);
            }
        }
        if self.attached.lock().contains(&surface) {
            self.record(Event::Sent(surface, message.clone()));
            return Ok(());
        }
        self.failed_sends.fetch_add(1, Ordering::SeqCst);
        self.record(Event::SendFailed(surface));
        Err(PlatformError::NoReceiver(surface.to_string()))
    }

    async fn create_result_surface(&self, _width: u32, _height: u32) -> Result<SurfaceId, PlatformError> {
        if self.surface_creation_fails {
            return Err(PlatformError::Surface("window limit reached".to_string()));
        }
        let id = SurfaceId(self.next_surface.fetch_add(1, Ordering::SeqCst));
        self.record(Event::CreateSurface(id));
        Ok(id)
    }

    async fn inject_and_extract(&self, tab: &Tab) -> Result<PageContent, PlatformError> {
        self.record(Event::Inject(tab.id));
        self.extraction_result()
    }

    async fn request_content(&self, tab: &Tab) -> Result<PageContent, PlatformError> {
        self.record(Event::RequestContent(tab.id));
        self.extraction_result()
    }

    async fn get_storage(&self, keys: &[&str]) -> Result<StorageRecord, PlatformError> {
        let storage = self.storage.lock();
        Ok(keys
            .iter()
            .filter_map(|k| storage.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set_storage(&self, values: StorageRecord) -> Result<(), PlatformError> {
        self.storage.lock().extend(values);
        Ok(())
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), PlatformError> {
        self.record(Event::Notify(title.to_string(), message.to_string()));
        Ok(())
    }
}

/// One recorded AI call.
#[derive(Debug, Clone, PartialEq)]
pub struct AiCall {
    pub page: Option<PageContent>,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Api(u16, String),
    Network(String),
}

pub struct FakeSummarizer {
    reply: Reply,
    latency: Duration,
    calls: Mutex<Vec<AiCall>>,
}

impl FakeSummarizer {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    pub fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<AiCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(
        &self,
        settings: &Settings,
        page: Option<&PageContent>,
        custom_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        if !settings.has_api_key() {
            return Err(ProviderError::MissingApiKey);
        }
        self.calls.lock().push(AiCall {
            page: page.cloned(),
            custom_prompt: custom_prompt.map(String::from),
        });
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Api(status, message) => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
            Reply::Network(message) => Err(ProviderError::Network(message.clone())),
        }
    }
}
