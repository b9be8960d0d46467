//! The request coordinator.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use pagebrief_config::{Config, DeliveryStrategy, ExtractionMethod, SurfaceConfig};
use pagebrief_protocols::error::SummarizeError;
use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::provider::{ModelCatalog, Summarizer};
use pagebrief_protocols::types::{
    ControlReply, PageContent, ResultMessage, Settings, StorageRecord, SummarizationRequest,
    SurfaceId, Tab, SETTINGS_KEYS,
};

use crate::context::RequestContext;
use crate::delivery::DeliveryPolicy;
use crate::readiness::{ReadinessRegistry, ReadyOutcome, ReadyWait};
use crate::state::{AbortReason, RequestState};

pub const API_KEY_REQUIRED_TITLE: &str = "API Key Required";
pub const API_KEY_REQUIRED_MESSAGE: &str =
    "Please open the extension settings and save your API key first.";
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt.";

/// A finished page summary, as replied to the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReply {
    pub summary: String,
    pub title: String,
    pub url: String,
}

impl SummaryReply {
    fn new(summary: String, page: PageContent) -> Self {
        Self {
            summary,
            title: page.title,
            url: page.url,
        }
    }

    pub fn into_message(self) -> ResultMessage {
        ResultMessage::DisplaySummary {
            summary: self.summary,
            title: self.title,
            url: self.url,
        }
    }
}

impl From<SummaryReply> for ControlReply {
    fn from(reply: SummaryReply) -> Self {
        ControlReply::Summary {
            summary: reply.summary,
            title: Some(reply.title),
            url: Some(reply.url),
        }
    }
}

/// Why an outcome went to a notification instead of its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoSurface,
    ReadyTimeout,
    Superseded,
    RetriesExhausted,
}

impl From<FallbackReason> for AbortReason {
    fn from(reason: FallbackReason) -> Self {
        match reason {
            FallbackReason::NoSurface => AbortReason::NoSurface,
            FallbackReason::ReadyTimeout => AbortReason::ReadyTimeout,
            FallbackReason::Superseded => AbortReason::Superseded,
            FallbackReason::RetriesExhausted => AbortReason::DeliveryExhausted,
        }
    }
}

/// Where the outcome of a new-window request ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryReport {
    Delivered {
        surface: SurfaceId,
        attempts: u32,
        outcome: ResultMessage,
    },
    Notified {
        reason: FallbackReason,
        outcome: ResultMessage,
    },
}

impl DeliveryReport {
    pub fn outcome(&self) -> &ResultMessage {
        match self {
            DeliveryReport::Delivered { outcome, .. } | DeliveryReport::Notified { outcome, .. } => {
                outcome
            }
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryReport::Delivered { .. })
    }
}

/// Orchestrates extraction, the AI call and delivery.
///
/// Each call runs its own pipeline with its own [`RequestContext`]; the only
/// state shared between requests is the readiness registry, keyed by surface.
pub struct Coordinator<P, S> {
    platform: Arc<P>,
    summarizer: Arc<S>,
    catalog: ModelCatalog,
    policy: DeliveryPolicy,
    strategy: DeliveryStrategy,
    ready_timeout: Duration,
    extraction: ExtractionMethod,
    surface: SurfaceConfig,
    readiness: ReadinessRegistry,
}

impl<P: Platform, S: Summarizer> Coordinator<P, S> {
    pub fn new(platform: Arc<P>, summarizer: Arc<S>, catalog: ModelCatalog, config: &Config) -> Self {
        Self {
            platform,
            summarizer,
            catalog,
            policy: DeliveryPolicy::from_config(&config.delivery),
            strategy: config.delivery.strategy,
            ready_timeout: config.delivery.ready_timeout(),
            extraction: config.extraction.method,
            surface: config.surface.clone(),
            readiness: ReadinessRegistry::with_ttl(config.delivery.ready_timeout()),
        }
    }

    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    pub fn readiness(&self) -> &ReadinessRegistry {
        &self.readiness
    }

    /// The model catalog.
    pub fn models(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Record that `surface` attached its listener. Only the handshake
    /// strategy waits for the signal; under retry it is ignored.
    pub fn surface_ready(&self, surface: SurfaceId) -> bool {
        if self.strategy != DeliveryStrategy::Handshake {
            debug!(surface = %surface, "Ready signal ignored under retry delivery");
            return false;
        }
        self.readiness.mark_ready(surface)
    }

    /// Read settings from the key-value store. An unreadable store counts
    /// as empty, which then fails the API key check.
    pub async fn load_settings(&self) -> Settings {
        let record = match self.platform.get_storage(&SETTINGS_KEYS).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Could not read settings, using defaults");
                StorageRecord::new()
            }
        };
        Settings::from_record(&record)
    }

    /// Popup path: summarize `tab` and return the reply directly.
    pub async fn summarize_in_place(&self, tab: Tab) -> Result<SummaryReply, SummarizeError> {
        let mut ctx = RequestContext::new(SummarizationRequest::popup(tab.clone()));
        info!(request_id = %ctx.id(), mode = ctx.mode_name(), tab = %tab.id, "Request started");

        let settings = self.load_settings().await;
        if !settings.has_api_key() {
            ctx.abort(AbortReason::MissingApiKey);
            return Err(SummarizeError::MissingApiKey);
        }

        let result = self.produce_summary(&mut ctx, &settings, &tab).await;
        ctx.transition(RequestState::DeliveringResult);
        ctx.transition(RequestState::Done);
        if let Err(e) = &result {
            warn!(request_id = %ctx.id(), error = %e, "Summary failed");
        }
        result
    }

    /// Context-menu path: open a result window, then summarize `tab` and
    /// deliver the outcome there.
    ///
    /// Errors after the key check are delivered as `displayError`; only a
    /// missing API key is returned as `Err`, after raising a notification.
    pub async fn summarize_in_new_surface(&self, tab: Tab) -> Result<DeliveryReport, SummarizeError> {
        let mut ctx = RequestContext::new(SummarizationRequest::context_menu(tab.clone()));
        info!(request_id = %ctx.id(), mode = ctx.mode_name(), tab = %tab.id, "Request started");

        let settings = self.load_settings().await;
        if !settings.has_api_key() {
            ctx.abort(AbortReason::MissingApiKey);
            if let Err(e) = self
                .platform
                .notify(API_KEY_REQUIRED_TITLE, API_KEY_REQUIRED_MESSAGE)
                .await
            {
                error!(request_id = %ctx.id(), error = %e, "Could not raise API key notification");
            }
            return Err(SummarizeError::MissingApiKey);
        }

        // The window opens before any slow work so the user sees feedback.
        let mut ready = None;
        match self
            .platform
            .create_result_surface(self.surface.width, self.surface.height)
            .await
        {
            Ok(surface) => {
                ctx.set_surface(surface);
                if self.strategy == DeliveryStrategy::Handshake {
                    ready = Some(self.readiness.claim(surface, ctx.id()));
                }
            }
            Err(e) => warn!(request_id = %ctx.id(), error = %e, "Could not open result window"),
        }

        let outcome = match self.produce_summary(&mut ctx, &settings, &tab).await {
            Ok(reply) => reply.into_message(),
            Err(e) => {
                warn!(request_id = %ctx.id(), error = %e, "Summary failed, delivering error");
                ResultMessage::error(e.to_string())
            }
        };

        ctx.transition(RequestState::DeliveringResult);
        self.deliver(&mut ctx, ready, outcome).await
    }

    /// Answer a free-form prompt. No extraction happens.
    pub async fn custom_prompt(&self, prompt: &str) -> Result<String, SummarizeError> {
        let mut ctx = RequestContext::new(SummarizationRequest::custom_prompt(prompt));
        info!(request_id = %ctx.id(), mode = ctx.mode_name(), "Request started");

        if prompt.trim().is_empty() {
            ctx.abort(AbortReason::InvalidRequest);
            return Err(SummarizeError::InvalidRequest(EMPTY_PROMPT_MESSAGE.to_string()));
        }

        let settings = self.load_settings().await;
        if !settings.has_api_key() {
            ctx.abort(AbortReason::MissingApiKey);
            return Err(SummarizeError::MissingApiKey);
        }

        ctx.transition(RequestState::AwaitingAiResponse);
        let result = self
            .summarizer
            .summarize(&settings, None, Some(prompt))
            .await
            .map_err(SummarizeError::from);
        ctx.transition(RequestState::DeliveringResult);
        ctx.transition(RequestState::Done);
        result
    }

    async fn produce_summary(
        &self,
        ctx: &mut RequestContext,
        settings: &Settings,
        tab: &Tab,
    ) -> Result<SummaryReply, SummarizeError> {
        ctx.transition(RequestState::ExtractingContent);
        let page = self.extract(tab).await?;

        ctx.transition(RequestState::AwaitingAiResponse);
        let summary = self.summarizer.summarize(settings, Some(&page), None).await?;
        Ok(SummaryReply::new(summary, page))
    }

    async fn extract(&self, tab: &Tab) -> Result<PageContent, SummarizeError> {
        let result = match self.extraction {
            ExtractionMethod::Inject => self.platform.inject_and_extract(tab).await,
            ExtractionMethod::ContentScript => self.platform.request_content(tab).await,
        };
        result.map_err(|e| SummarizeError::Extraction(e.to_string()))
    }

    async fn deliver(
        &self,
        ctx: &mut RequestContext,
        ready: Option<ReadyWait>,
        outcome: ResultMessage,
    ) -> Result<DeliveryReport, SummarizeError> {
        let report = self.deliver_to_surface(ctx, ready, outcome).await;
        if let Some(surface) = ctx.surface() {
            self.readiness.release(surface, ctx.id());
        }
        report
    }

    async fn deliver_to_surface(
        &self,
        ctx: &mut RequestContext,
        ready: Option<ReadyWait>,
        outcome: ResultMessage,
    ) -> Result<DeliveryReport, SummarizeError> {
        let Some(surface) = ctx.surface() else {
            return self.fall_back(ctx, FallbackReason::NoSurface, outcome).await;
        };

        if let Some(ready) = ready {
            match ready.wait(&self.readiness, self.ready_timeout).await {
                ReadyOutcome::Ready => {}
                ReadyOutcome::TimedOut => {
                    return self.fall_back(ctx, FallbackReason::ReadyTimeout, outcome).await;
                }
                ReadyOutcome::Superseded => {
                    return self.fall_back(ctx, FallbackReason::Superseded, outcome).await;
                }
            }
        }

        match self.policy.deliver(&*self.platform, ctx.id(), surface, &outcome).await {
            Ok(attempts) => {
                ctx.transition(RequestState::Done);
                info!(
                    request_id = %ctx.id(),
                    surface = %surface,
                    attempts,
                    error = outcome.is_error(),
                    "Request finished"
                );
                Ok(DeliveryReport::Delivered {
                    surface,
                    attempts,
                    outcome,
                })
            }
            Err(_) => self.fall_back(ctx, FallbackReason::RetriesExhausted, outcome).await,
        }
    }

    async fn fall_back(
        &self,
        ctx: &mut RequestContext,
        reason: FallbackReason,
        outcome: ResultMessage,
    ) -> Result<DeliveryReport, SummarizeError> {
        ctx.abort(reason.into());
        let (title, body) = outcome.notification_text();
        warn!(request_id = %ctx.id(), reason = ?reason, "Result window unreachable, notifying instead");

        if let Err(e) = self.platform.notify(title, body).await {
            error!(request_id = %ctx.id(), error = %e, "Notification fallback failed");
            return Err(SummarizeError::Delivery(format!("{:?}: {}", reason, e)));
        }
        Ok(DeliveryReport::Notified { reason, outcome })
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
