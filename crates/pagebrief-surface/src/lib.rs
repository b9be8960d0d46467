//! UI surface state for pagebrief.
//!
//! Markup-free models of what the popup and the result window show, plus the
//! read-aloud controller. A host renders these however it likes.

mod popup;
mod result_view;
mod speech;

pub use popup::{ModelOption, PopupStatus, PopupView};
pub use result_view::{ApplyOutcome, ResultPanel, ResultView};
pub use speech::{
    group_voices, select_voice, SpeechController, SpeechEngine, SpeechError, Utterance, Voice,
    VoiceGroups, LABEL_READ, LABEL_STOP,
};
