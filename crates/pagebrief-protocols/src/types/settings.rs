//! Persisted user settings.
//!
//! Settings live in the platform key-value store as a flat record of
//! scalar values. [`Settings::from_record`] is tolerant: absent or malformed
//! values fall back to defaults, because the record is written by UI code
//! and never schema-versioned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::sanitize::sanitize_header_value;

/// Flat key-value record as stored by the platform.
pub type StorageRecord = serde_json::Map<String, serde_json::Value>;

pub const KEY_API_KEY: &str = "apiKey";
pub const KEY_PROVIDER: &str = "provider";
pub const KEY_MODEL: &str = "model";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_TTS_RATE: &str = "ttsRate";
pub const KEY_TTS_PITCH: &str = "ttsPitch";
pub const KEY_TTS_VOICE: &str = "ttsVoice";

/// Every key a [`Settings`] record is made of.
pub const SETTINGS_KEYS: [&str; 7] = [
    KEY_API_KEY,
    KEY_PROVIDER,
    KEY_MODEL,
    KEY_LANGUAGE,
    KEY_TTS_RATE,
    KEY_TTS_PITCH,
    KEY_TTS_VOICE,
];

/// LLM API provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenRouter,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::OpenAi => "openai",
        }
    }

    /// Interpret a stored provider value. Anything but `openai` selects OpenRouter.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("openai") {
            Provider::OpenAi
        } else {
            Provider::OpenRouter
        }
    }

    /// Model used when the settings carry none.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::OpenRouter => "openai/gpt-4o-mini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human language the summary is requested in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Chinese,
    Japanese,
    Korean,
    Arabic,
    Hindi,
    Dutch,
    Polish,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 15] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Russian,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
        Language::Arabic,
        Language::Hindi,
        Language::Dutch,
        Language::Polish,
        Language::Turkish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Russian => "russian",
            Language::Chinese => "chinese",
            Language::Japanese => "japanese",
            Language::Korean => "korean",
            Language::Arabic => "arabic",
            Language::Hindi => "hindi",
            Language::Dutch => "dutch",
            Language::Polish => "polish",
            Language::Turkish => "turkish",
        }
    }

    /// Two-letter prefix used to match speech voices (`en`, `es`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Arabic => "ar",
            Language::Hindi => "hi",
            Language::Dutch => "nl",
            Language::Polish => "pl",
            Language::Turkish => "tr",
        }
    }

    /// Full locale tag for an utterance when no voice is chosen.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Spanish => "es-ES",
            Language::French => "fr-FR",
            Language::German => "de-DE",
            Language::Italian => "it-IT",
            Language::Portuguese => "pt-PT",
            Language::Russian => "ru-RU",
            Language::Chinese => "zh-CN",
            Language::Japanese => "ja-JP",
            Language::Korean => "ko-KR",
            Language::Arabic => "ar-SA",
            Language::Hindi => "hi-IN",
            Language::Dutch => "nl-NL",
            Language::Polish => "pl-PL",
            Language::Turkish => "tr-TR",
        }
    }

    /// Capitalized name for group labels ("Spanish Voices").
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == wanted)
            .ok_or_else(|| format!("unsupported language: {}", s))
    }
}

/// Text-to-speech preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsSettings {
    pub rate: f32,
    pub pitch: f32,
    /// Preferred voice name; `None` means pick the best available.
    pub voice_name: Option<String>,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            voice_name: None,
        }
    }
}

/// The persisted settings record.
#[derive(Clone, Default, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub provider: Provider,
    pub model: Option<String>,
    pub language: Language,
    pub tts: TtsSettings,
}

impl Settings {
    /// Read settings out of a storage record.
    pub fn from_record(record: &StorageRecord) -> Self {
        let language = match string_value(record, KEY_LANGUAGE) {
            Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to english", e);
                Language::English
            }),
            _ => Language::English,
        };

        Self {
            api_key: string_value(record, KEY_API_KEY).unwrap_or_default(),
            provider: string_value(record, KEY_PROVIDER)
                .map(|p| Provider::from_stored(&p))
                .unwrap_or_default(),
            model: string_value(record, KEY_MODEL).filter(|m| !m.trim().is_empty()),
            language,
            tts: TtsSettings {
                rate: positive_number(record, KEY_TTS_RATE).unwrap_or(1.0),
                pitch: positive_number(record, KEY_TTS_PITCH).unwrap_or(1.0),
                voice_name: string_value(record, KEY_TTS_VOICE).filter(|v| !v.is_empty()),
            },
        }
    }

    /// Flatten into a storage record carrying every settings key.
    pub fn to_record(&self) -> StorageRecord {
        let mut record = StorageRecord::new();
        record.insert(KEY_API_KEY.into(), self.api_key.clone().into());
        record.insert(KEY_PROVIDER.into(), self.provider.as_str().into());
        record.insert(
            KEY_MODEL.into(),
            self.model.clone().unwrap_or_default().into(),
        );
        record.insert(KEY_LANGUAGE.into(), self.language.as_str().into());
        record.insert(KEY_TTS_RATE.into(), serde_json::json!(self.tts.rate));
        record.insert(KEY_TTS_PITCH.into(), serde_json::json!(self.tts.pitch));
        record.insert(
            KEY_TTS_VOICE.into(),
            self.tts.voice_name.clone().unwrap_or_default().into(),
        );
        record
    }

    /// True when an API key survives header sanitization. Keys made only
    /// of whitespace or invisible characters count as missing.
    pub fn has_api_key(&self) -> bool {
        !sanitize_header_value(&self.api_key).is_empty()
    }

    /// The configured model, or the provider's default.
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &mask_secret(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("language", &self.language)
            .field("tts", &self.tts)
            .finish()
    }
}

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(8), tail)
}

fn string_value(record: &StorageRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Slider values are stored as strings or numbers; zero or garbage means unset.
fn positive_number(record: &StorageRecord, key: &str) -> Option<f32> {
    let value = match record.get(key)? {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value > 0.0).then_some(value as f32)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
