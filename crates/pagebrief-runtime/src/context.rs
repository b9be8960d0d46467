//! Per-request context.

use chrono::{DateTime, Utc};
use tracing::{debug, error};
use uuid::Uuid;

use pagebrief_protocols::types::{RequestMode, SummarizationRequest, SurfaceId};

use crate::state::{AbortReason, RequestState};

/// Everything one in-flight request owns: its identity, state and target
/// surface. Nothing here is shared between requests.
#[derive(Debug)]
pub struct RequestContext {
    id: Uuid,
    request: SummarizationRequest,
    state: RequestState,
    surface: Option<SurfaceId>,
    started_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(request: SummarizationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            state: RequestState::Idle,
            surface: None,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &SummarizationRequest {
        &self.request
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    pub fn set_surface(&mut self, surface: SurfaceId) {
        self.surface = Some(surface);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn mode_name(&self) -> &'static str {
        match self.request.mode {
            RequestMode::Page if self.request.open_in_new_surface => "page_new_surface",
            RequestMode::Page => "page_in_place",
            RequestMode::CustomPrompt(_) => "custom_prompt",
        }
    }

    /// Move to `next`. Invalid transitions are refused and logged.
    pub fn transition(&mut self, next: RequestState) -> bool {
        if !self.state.can_transition_to(next) {
            error!(
                request_id = %self.id,
                from = %self.state,
                to = %next,
                "Invalid request state transition"
            );
            return false;
        }
        debug!(request_id = %self.id, from = %self.state, to = %next, "Request state");
        self.state = next;
        true
    }

    pub fn abort(&mut self, reason: AbortReason) -> bool {
        self.transition(RequestState::Aborted(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebrief_protocols::types::Tab;

    #[test]
    fn test_new_context_is_idle() {
        let ctx = RequestContext::new(SummarizationRequest::popup(Tab::new(1)));
        assert_eq!(ctx.state(), RequestState::Idle);
        assert!(ctx.surface().is_none());
        assert_eq!(ctx.mode_name(), "page_in_place");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = RequestContext::new(SummarizationRequest::custom_prompt("x"));
        let b = RequestContext::new(SummarizationRequest::custom_prompt("x"));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.mode_name(), "custom_prompt");
    }

    #[test]
    fn test_transition_validation() {
        let mut ctx = RequestContext::new(SummarizationRequest::context_menu(Tab::new(2)));
        assert_eq!(ctx.mode_name(), "page_new_surface");
        assert!(ctx.transition(RequestState::ExtractingContent));
        assert!(!ctx.transition(RequestState::Done));
        assert_eq!(ctx.state(), RequestState::ExtractingContent);
        assert!(ctx.abort(AbortReason::NoSurface));
        assert!(!ctx.transition(RequestState::AwaitingAiResponse));
    }

    #[test]
    fn test_surface_assignment() {
        let mut ctx = RequestContext::new(SummarizationRequest::context_menu(Tab::new(2)));
        ctx.set_surface(SurfaceId(9));
        assert_eq!(ctx.surface(), Some(SurfaceId(9)));
    }
}
