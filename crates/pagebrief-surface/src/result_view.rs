//! Result window state.

use tracing::{debug, warn};

use pagebrief_protocols::types::{ControlMessage, ResultMessage};

/// What the result window currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    Loading,
    Summary {
        title: String,
        url: String,
        summary: String,
    },
    Error {
        text: String,
    },
}

/// Result of applying an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Rendered,
    /// Same message as the one already shown.
    Duplicate,
    /// A different message after one was shown; ignored.
    Conflict,
}

/// One result window. Renders exactly one outcome.
#[derive(Debug, Clone)]
pub struct ResultView {
    panel: ResultPanel,
    shown: Option<ResultMessage>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultView {
    pub fn new() -> Self {
        Self {
            panel: ResultPanel::Loading,
            shown: None,
        }
    }

    /// Signal sent once the window's listener is attached.
    pub fn ready_message(&self) -> ControlMessage {
        ControlMessage::ResultReady
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn is_loading(&self) -> bool {
        self.panel == ResultPanel::Loading
    }

    pub fn apply(&mut self, message: ResultMessage) -> ApplyOutcome {
        if let Some(shown) = &self.shown {
            if *shown == message {
                debug!("Duplicate result message ignored");
                return ApplyOutcome::Duplicate;
            }
            warn!("Conflicting result message ignored");
            return ApplyOutcome::Conflict;
        }

        self.panel = match &message {
            ResultMessage::DisplaySummary {
                summary,
                title,
                url,
            } => ResultPanel::Summary {
                title: title.clone(),
                url: url.clone(),
                summary: summary.clone(),
            },
            ResultMessage::DisplayError { error } => ResultPanel::Error {
                text: format!("Error: {}", error),
            },
        };
        self.shown = Some(message);
        ApplyOutcome::Rendered
    }

    /// Text placed on the clipboard by the copy button.
    pub fn clipboard_text(&self) -> Option<String> {
        match &self.panel {
            ResultPanel::Summary {
                title,
                url,
                summary,
            } => Some(format!("{}\n{}\n\n{}", title, url, summary)),
            _ => None,
        }
    }

    /// Text read aloud.
    pub fn speech_text(&self) -> Option<&str> {
        match &self.panel {
            ResultPanel::Summary { summary, .. } => Some(summary),
            _ => None,
        }
    }
}
