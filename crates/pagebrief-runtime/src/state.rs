//! Per-request state machine.

use std::fmt;

/// Why a request ended without reaching `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// No API key stored; nothing was attempted.
    MissingApiKey,
    /// The request itself was malformed (e.g. an empty prompt).
    InvalidRequest,
    /// The result window never signalled ready in time.
    ReadyTimeout,
    /// A newer request claimed the same result window.
    Superseded,
    /// Every delivery attempt failed.
    DeliveryExhausted,
    /// No result window could be opened.
    NoSurface,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AbortReason::MissingApiKey => "missing API key",
            AbortReason::InvalidRequest => "invalid request",
            AbortReason::ReadyTimeout => "result window not ready",
            AbortReason::Superseded => "superseded",
            AbortReason::DeliveryExhausted => "delivery attempts exhausted",
            AbortReason::NoSurface => "no result window",
        };
        f.write_str(text)
    }
}

/// Lifecycle of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    ExtractingContent,
    AwaitingAiResponse,
    DeliveringResult,
    Done,
    Aborted(AbortReason),
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Done | RequestState::Aborted(_))
    }

    /// Whether `next` may follow `self`.
    ///
    /// Custom prompts skip extraction, and a failed extraction or AI call
    /// goes straight to delivery as an error outcome. `Aborted` is reachable
    /// from every non-terminal state.
    pub fn can_transition_to(&self, next: RequestState) -> bool {
        use RequestState::*;
        match (self, next) {
            (Done | Aborted(_), _) => false,
            (_, Aborted(_)) => true,
            (Idle, ExtractingContent | AwaitingAiResponse) => true,
            (ExtractingContent, AwaitingAiResponse | DeliveringResult) => true,
            (AwaitingAiResponse, DeliveringResult) => true,
            (DeliveringResult, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => f.write_str("idle"),
            RequestState::ExtractingContent => f.write_str("extracting_content"),
            RequestState::AwaitingAiResponse => f.write_str("awaiting_ai_response"),
            RequestState::DeliveringResult => f.write_str("delivering_result"),
            RequestState::Done => f.write_str("done"),
            RequestState::Aborted(reason) => write!(f, "aborted({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestState::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [Idle, ExtractingContent, AwaitingAiResponse, DeliveringResult, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_custom_prompt_skips_extraction() {
        assert!(Idle.can_transition_to(AwaitingAiResponse));
    }

    #[test]
    fn test_extraction_failure_goes_to_delivery() {
        assert!(ExtractingContent.can_transition_to(DeliveringResult));
    }

    #[test]
    fn test_abort_from_any_live_state() {
        for state in [Idle, ExtractingContent, AwaitingAiResponse, DeliveringResult] {
            assert!(state.can_transition_to(Aborted(AbortReason::Superseded)));
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!Done.can_transition_to(Idle));
        assert!(!Done.can_transition_to(Aborted(AbortReason::NoSurface)));
        let aborted = Aborted(AbortReason::MissingApiKey);
        assert!(aborted.is_terminal());
        assert!(!aborted.can_transition_to(Done));
    }

    #[test]
    fn test_no_skipping_backwards() {
        assert!(!DeliveringResult.can_transition_to(ExtractingContent));
        assert!(!AwaitingAiResponse.can_transition_to(ExtractingContent));
        assert!(!Idle.can_transition_to(Done));
    }

    #[test]
    fn test_display() {
        assert_eq!(AwaitingAiResponse.to_string(), "awaiting_ai_response");
        assert_eq!(
            Aborted(AbortReason::ReadyTimeout).to_string(),
            "aborted(result window not ready)"
        );
    }
}
