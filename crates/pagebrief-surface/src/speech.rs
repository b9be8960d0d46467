//! Read-aloud support.
//!
//! The host supplies a [`SpeechEngine`]; [`SpeechController`] wraps it with
//! the toggle behavior of the speak button.

use thiserror::Error;
use tracing::{debug, warn};

use pagebrief_protocols::types::{Language, TtsSettings};

pub const LABEL_READ: &str = "Read Aloud";
pub const LABEL_STOP: &str = "Stop Reading";

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 tag, e.g. `en-US`.
    pub lang: String,
    pub is_default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            is_default: false,
        }
    }

    pub fn default_voice(mut self) -> Self {
        self.is_default = true;
        self
    }

    fn speaks(&self, language: Language) -> bool {
        self.lang.starts_with(language.code())
    }

    /// Dropdown label.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<String>,
    pub lang: Option<String>,
}

impl Utterance {
    /// Popup reader: engine default voice in the language's locale.
    pub fn in_locale(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            voice: None,
            lang: Some(language.locale().to_string()),
        }
    }

    /// Result window reader: stored rate and pitch, spoken by `voice` when one is chosen.
    pub fn with_voice(text: impl Into<String>, tts: &TtsSettings, voice: Option<&Voice>) -> Self {
        Self {
            text: text.into(),
            rate: positive_or_one(tts.rate),
            pitch: positive_or_one(tts.pitch),
            voice: voice.map(|v| v.name.clone()),
            lang: voice.map(|v| v.lang.clone()),
        }
    }
}

fn positive_or_one(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech synthesis unavailable")]
    Unavailable,

    #[error("speech failed: {0}")]
    Failed(String),
}

/// Platform speech synthesis.
pub trait SpeechEngine: Send {
    fn voices(&self) -> Vec<Voice>;

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop any utterance in progress. A no-op when silent.
    fn cancel(&mut self);
}

/// Speak button state over an engine.
pub struct SpeechController<E> {
    engine: E,
    speaking: bool,
}

impl<E: SpeechEngine> SpeechController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            speaking: false,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn button_label(&self) -> &'static str {
        if self.speaking {
            LABEL_STOP
        } else {
            LABEL_READ
        }
    }

    /// Speak button pressed. Stops playback when speaking, otherwise starts
    /// `utterance`. Returns whether speech is now playing.
    pub fn toggle(&mut self, utterance: Utterance) -> Result<bool, SpeechError> {
        if self.speaking {
            self.stop();
            return Ok(false);
        }
        self.start(utterance)?;
        Ok(true)
    }

    /// Start `utterance`, cancelling whatever is playing first.
    pub fn start(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        self.engine.cancel();
        self.speaking = false;
        if let Err(e) = self.engine.speak(&utterance) {
            warn!("Speech failed: {}", e);
            return Err(e);
        }
        debug!(chars = utterance.text.chars().count(), "Speaking");
        self.speaking = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.engine.cancel();
        self.speaking = false;
    }

    /// The engine reported the end of the utterance (or an error while playing).
    pub fn finished(&mut self) {
        self.speaking = false;
    }
}

/// Pick the voice for `language`.
///
/// Order: the saved voice by name, a Google voice for the language, any voice
/// for the language, the engine default, the first voice.
pub fn select_voice<'a>(
    voices: &'a [Voice],
    preferred: Option<&str>,
    language: Language,
) -> Option<&'a Voice> {
    if let Some(name) = preferred.filter(|n| !n.is_empty()) {
        if let Some(voice) = voices.iter().find(|v| v.name == name) {
            return Some(voice);
        }
    }

    voices
        .iter()
        .find(|v| v.speaks(language) && v.name.to_lowercase().contains("google"))
        .or_else(|| voices.iter().find(|v| v.speaks(language)))
        .or_else(|| voices.iter().find(|v| v.is_default))
        .or_else(|| voices.first())
}

/// Voice dropdown contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceGroups {
    pub matching_label: String,
    pub matching: Vec<Voice>,
    pub others: Vec<Voice>,
}

impl VoiceGroups {
    pub const OTHERS_LABEL: &'static str = "Other Voices";

    pub fn is_empty(&self) -> bool {
        self.matching.is_empty() && self.others.is_empty()
    }
}

pub fn group_voices(voices: &[Voice], language: Language) -> VoiceGroups {
    let (matching, others): (Vec<Voice>, Vec<Voice>) = voices.iter().cloned().partition(|v| v.speaks(language));
    VoiceGroups {
        matching_label: format!("{} Voices", language.display_name()),
        matching,
        others,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEngine {
        voices: Vec<Voice>,
        spoken: Vec<Utterance>,
        cancels: usize,
        fail: bool,
    }

    impl SpeechEngine for FakeEngine {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
            if self.fail {
                return Err(SpeechError::Unavailable);
            }
            self.spoken.push(utterance.clone());
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("Alex", "en-US").default_voice(),
            Voice::new("Monica", "es-ES"),
            Voice::new("Google español", "es-US"),
            Voice::new("Thomas", "fr-FR"),
        ]
    }

    #[test]
    fn test_select_saved_voice_first() {
        let voices = voices();
        let voice = select_voice(&voices, Some("Thomas"), Language::Spanish).unwrap();
        assert_eq!(voice.name, "Thomas");
    }

    #[test]
    fn test_select_prefers_google_for_language() {
        let voices = voices();
        let voice = select_voice(&voices, None, Language::Spanish).unwrap();
        assert_eq!(voice.name, "Google español");

        let voice = select_voice(&voices, Some("Missing"), Language::French).unwrap();
        assert_eq!(voice.name, "Thomas");
    }

    #[test]
    fn test_select_falls_back_to_default_then_first() {
        let voices = voices();
        assert_eq!(select_voice(&voices, None, Language::Japanese).unwrap().name, "Alex");

        let plain = vec![Voice::new("Anna", "de-DE"), Voice::new("Yuri", "ru-RU")];
        assert_eq!(select_voice(&plain, None, Language::Korean).unwrap().name, "Anna");
        assert!(select_voice(&[], None, Language::English).is_none());
    }

    #[test]
    fn test_group_voices() {
        let groups = group_voices(&voices(), Language::Spanish);
        assert_eq!(groups.matching_label, "Spanish Voices");
        let names: Vec<&str> = groups.matching.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Monica", "Google español"]);
        assert_eq!(groups.others.len(), 2);
        assert_eq!(groups.matching[0].label(), "Monica (es-ES)");
    }

    #[test]
    fn test_toggle_starts_and_stops() {
        let mut speech = SpeechController::new(FakeEngine::default());
        assert_eq!(speech.button_label(), "Read Aloud");

        assert!(speech.toggle(Utterance::in_locale("hello", Language::English)).unwrap());
        assert!(speech.is_speaking());
        assert_eq!(speech.button_label(), "Stop Reading");
        assert_eq!(speech.engine().spoken[0].lang.as_deref(), Some("en-US"));

        assert!(!speech.toggle(Utterance::in_locale("hello", Language::English)).unwrap());
        assert!(!speech.is_speaking());
        assert_eq!(speech.engine().spoken.len(), 1);
    }

    #[test]
    fn test_start_cancels_previous() {
        let mut speech = SpeechController::new(FakeEngine::default());
        speech.start(Utterance::in_locale("one", Language::English)).unwrap();
        speech.start(Utterance::in_locale("two", Language::English)).unwrap();
        assert_eq!(speech.engine().cancels, 2);
        assert_eq!(speech.engine().spoken.len(), 2);
    }

    #[test]
    fn test_finished_resets_label() {
        let mut speech = SpeechController::new(FakeEngine::default());
        speech.start(Utterance::in_locale("one", Language::English)).unwrap();
        speech.finished();
        assert_eq!(speech.button_label(), "Read Aloud");
    }

    #[test]
    fn test_engine_failure_is_reported() {
        let engine = FakeEngine {
            fail: true,
            ..Default::default()
        };
        let mut speech = SpeechController::new(engine);
        let err = speech
            .toggle(Utterance::in_locale("one", Language::English))
            .unwrap_err();
        assert_eq!(err, SpeechError::Unavailable);
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_utterance_with_voice() {
        let tts = TtsSettings {
            rate: 1.5,
            pitch: 0.0,
            voice_name: None,
        };
        let voice = Voice::new("Monica", "es-ES");
        let utterance = Utterance::with_voice("hola", &tts, Some(&voice));
        assert_eq!(utterance.rate, 1.5);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.voice.as_deref(), Some("Monica"));
        assert_eq!(utterance.lang.as_deref(), Some("es-ES"));

        let utterance = Utterance::with_voice("hola", &tts, None);
        assert!(utterance.voice.is_none());
        assert!(utterance.lang.is_none());
    }
}
