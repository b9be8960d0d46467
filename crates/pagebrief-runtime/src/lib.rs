//! Request coordinator for pagebrief.
//!
//! Owns the lifecycle of one summarization request: settings check,
//! page extraction, the AI call, and delivery of the outcome to the right
//! surface. Result windows load asynchronously, so delivery either waits
//! for the window's ready signal or retries with backoff, and falls back to
//! a system notification when the window never becomes reachable.

mod context;
mod coordinator;
mod delivery;
mod readiness;
mod router;
mod state;

#[cfg(test)]
mod test_support;

pub use context::RequestContext;
pub use coordinator::{
    Coordinator, DeliveryReport, FallbackReason, SummaryReply, API_KEY_REQUIRED_MESSAGE,
    API_KEY_REQUIRED_TITLE, EMPTY_PROMPT_MESSAGE,
};
pub use delivery::{DeliveryFailure, DeliveryPolicy};
pub use readiness::{ReadinessRegistry, ReadyOutcome, ReadyWait};
pub use state::{AbortReason, RequestState};
