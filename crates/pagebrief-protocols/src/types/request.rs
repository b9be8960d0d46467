//! Summarization request description.

use super::Tab;

/// What a request summarizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMode {
    /// Extract the source tab and summarize it.
    Page,
    /// Send the prompt verbatim; no extraction.
    CustomPrompt(String),
}

/// One invocation of the coordinator. Never persisted, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    pub source_tab: Option<Tab>,
    pub mode: RequestMode,
    pub open_in_new_surface: bool,
}

impl SummarizationRequest {
    /// Popup click: summarize in place, reply directly.
    pub fn popup(tab: Tab) -> Self {
        Self {
            source_tab: Some(tab),
            mode: RequestMode::Page,
            open_in_new_surface: false,
        }
    }

    /// Context-menu click: open a result surface and deliver there.
    pub fn context_menu(tab: Tab) -> Self {
        Self {
            source_tab: Some(tab),
            mode: RequestMode::Page,
            open_in_new_surface: true,
        }
    }

    pub fn custom_prompt(prompt: impl Into<String>) -> Self {
        Self {
            source_tab: None,
            mode: RequestMode::CustomPrompt(prompt.into()),
            open_in_new_surface: false,
        }
    }

    pub fn needs_extraction(&self) -> bool {
        self.mode == RequestMode::Page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_request() {
        let req = SummarizationRequest::popup(Tab::new(1));
        assert!(req.needs_extraction());
        assert!(!req.open_in_new_surface);
    }

    #[test]
    fn test_context_menu_request() {
        let req = SummarizationRequest::context_menu(Tab::new(1));
        assert!(req.open_in_new_surface);
    }

    #[test]
    fn test_custom_prompt_skips_extraction() {
        let req = SummarizationRequest::custom_prompt("hi");
        assert!(!req.needs_extraction());
        assert!(req.source_tab.is_none());
    }
}
