//! Popup state.

use pagebrief_protocols::provider::ModelCatalog;
use pagebrief_protocols::types::{ControlMessage, ControlReply, Provider, Settings, Tab};

const SUMMARY_LOADING: &str = "Generating summary...";
const PROMPT_LOADING: &str = "Generating response...";
const EMPTY_PROMPT: &str = "Please enter a prompt.";
const SETTINGS_SAVED: &str = "Settings saved successfully!";

/// The popup's result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupStatus {
    Hidden,
    Loading(&'static str),
    Reply(String),
    Error(String),
    Notice(&'static str),
}

/// One entry of the model dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct PopupView {
    status: PopupStatus,
    settings_open: bool,
    busy: bool,
    can_speak: bool,
}

impl PopupView {
    /// Popup as first opened. Settings are shown when no key is saved.
    pub fn open(settings: &Settings) -> Self {
        Self {
            status: PopupStatus::Hidden,
            settings_open: !settings.has_api_key(),
            busy: false,
            can_speak: false,
        }
    }

    pub fn status(&self) -> &PopupStatus {
        &self.status
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the read-aloud button is offered.
    pub fn can_speak(&self) -> bool {
        self.can_speak
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    /// Summarize button.
    pub fn begin_summary(&mut self, tab: Tab) -> ControlMessage {
        self.start(SUMMARY_LOADING);
        ControlMessage::SummarizePage { tab }
    }

    /// Send button of the prompt panel. `None` when there is nothing to send.
    pub fn begin_prompt(&mut self, text: &str) -> Option<ControlMessage> {
        let prompt = text.trim();
        if prompt.is_empty() {
            self.status = PopupStatus::Error(EMPTY_PROMPT.to_string());
            return None;
        }
        self.start(PROMPT_LOADING);
        Some(ControlMessage::SendCustomPrompt {
            prompt: prompt.to_string(),
        })
    }

    fn start(&mut self, loading: &'static str) {
        self.status = PopupStatus::Loading(loading);
        self.busy = true;
        self.can_speak = false;
    }

    /// Show the coordinator's reply.
    pub fn apply_reply(&mut self, reply: ControlReply) {
        self.busy = false;
        match reply {
            ControlReply::Summary { summary, .. } => {
                self.status = PopupStatus::Reply(summary);
                self.can_speak = true;
            }
            ControlReply::Error { error } => self.show_error(&error),
            other => self.show_error(&format!("Unexpected reply: {:?}", other)),
        }
    }

    /// The request could not be sent or no reply arrived.
    pub fn show_error(&mut self, message: &str) {
        self.busy = false;
        self.can_speak = false;
        self.status = PopupStatus::Error(format!("Error: {}", message));
        if message.contains("API key") {
            self.settings_open = true;
        }
    }

    pub fn settings_saved(&mut self, settings: &Settings) {
        self.status = PopupStatus::Notice(SETTINGS_SAVED);
        self.settings_open = !settings.has_api_key();
    }

    /// Text read aloud, when a reply is shown.
    pub fn speech_text(&self) -> Option<&str> {
        match &self.status {
            PopupStatus::Reply(text) => Some(text),
            _ => None,
        }
    }
}

impl ModelOption {
    /// Dropdown entries for `provider`, marking `selected` (or the first entry).
    pub fn list(catalog: &ModelCatalog, provider: Provider, selected: Option<&str>) -> Vec<Self> {
        let models = catalog.models_for(provider);
        let selected = selected.filter(|id| models.iter().any(|m| m.id == *id));
        models
            .iter()
            .enumerate()
            .map(|(i, m)| ModelOption {
                id: m.id.clone(),
                name: m.display_name.clone(),
                selected: match selected {
                    Some(id) => m.id == id,
                    None => i == 0,
                },
            })
            .collect()
    }
}
