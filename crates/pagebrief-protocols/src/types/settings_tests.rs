use super::*;
use serde_json::json;

fn record(value: serde_json::Value) -> StorageRecord {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_empty_record_gives_defaults() {
    let settings = Settings::from_record(&StorageRecord::new());
    assert_eq!(settings.api_key, "");
    assert!(!settings.has_api_key());
    assert_eq!(settings.provider, Provider::OpenRouter);
    assert_eq!(settings.language, Language::English);
    assert!(settings.model.is_none());
    assert_eq!(settings.tts, TtsSettings::default());
}

#[test]
fn test_full_record() {
    let settings = Settings::from_record(&record(json!({
        "apiKey": "sk-test",
        "provider": "openai",
        "model": "gpt-4o",
        "language": "spanish",
        "ttsRate": "1.5",
        "ttsPitch": 0.8,
        "ttsVoice": "Google español"
    })));
    assert!(settings.has_api_key());
    assert_eq!(settings.provider, Provider::OpenAi);
    assert_eq!(settings.model.as_deref(), Some("gpt-4o"));
    assert_eq!(settings.language, Language::Spanish);
    assert_eq!(settings.tts.rate, 1.5);
    assert_eq!(settings.tts.pitch, 0.8);
    assert_eq!(settings.tts.voice_name.as_deref(), Some("Google español"));
}

#[test]
fn test_unknown_provider_selects_openrouter() {
    let settings = Settings::from_record(&record(json!({"provider": "anthropic"})));
    assert_eq!(settings.provider, Provider::OpenRouter);
}

#[test]
fn test_unknown_language_falls_back_to_english() {
    let settings = Settings::from_record(&record(json!({"language": "klingon"})));
    assert_eq!(settings.language, Language::English);
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    let settings = Settings::from_record(&record(json!({"apiKey": "   "})));
    assert!(!settings.has_api_key());
}

#[test]
fn test_invisible_api_key_counts_as_missing() {
    for key in ["\u{200B}\u{FEFF}", "\u{00A0}\r\n", "\u{7f}"] {
        let settings = Settings::from_record(&record(json!({ "apiKey": key })));
        assert!(!settings.has_api_key(), "{:?} should not count as a key", key);
    }
    let settings = Settings::from_record(&record(json!({"apiKey": "\u{200B}sk-abc"})));
    assert!(settings.has_api_key());
}

#[test]
fn test_zero_or_garbage_tts_values_default_to_one() {
    let settings = Settings::from_record(&record(json!({
        "ttsRate": "0",
        "ttsPitch": "fast"
    })));
    assert_eq!(settings.tts.rate, 1.0);
    assert_eq!(settings.tts.pitch, 1.0);
}

#[test]
fn test_empty_model_uses_provider_default() {
    let settings = Settings::from_record(&record(json!({"provider": "openai", "model": ""})));
    assert!(settings.model.is_none());
    assert_eq!(settings.model_or_default(), "gpt-4o-mini");

    let settings = Settings::from_record(&record(json!({})));
    assert_eq!(settings.model_or_default(), "openai/gpt-4o-mini");
}

#[test]
fn test_to_record_carries_every_key() {
    let settings = Settings {
        api_key: "sk-abc".to_string(),
        provider: Provider::OpenAi,
        model: Some("gpt-4o".to_string()),
        language: Language::German,
        tts: TtsSettings::default(),
    };
    let stored = settings.to_record();
    for key in SETTINGS_KEYS {
        assert!(stored.contains_key(key), "missing {}", key);
    }
    assert_eq!(Settings::from_record(&stored), settings);
}

#[test]
fn test_debug_masks_api_key() {
    let settings = Settings {
        api_key: "sk-very-secret-1234".to_string(),
        ..Default::default()
    };
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("1234"));
}

#[test]
fn test_mask_secret() {
    assert_eq!(mask_secret(""), "(not set)");
    assert_eq!(mask_secret("abc"), "***");
    assert_eq!(mask_secret("sk-123456"), "********3456");
}

#[test]
fn test_language_codes() {
    assert_eq!(Language::English.code(), "en");
    assert_eq!(Language::Chinese.code(), "zh");
    assert_eq!(Language::Arabic.locale(), "ar-SA");
    assert_eq!(Language::Portuguese.locale(), "pt-PT");
}

#[test]
fn test_language_parse_is_case_insensitive() {
    assert_eq!("French".parse::<Language>().unwrap(), Language::French);
    assert!("esperanto".parse::<Language>().is_err());
}

#[test]
fn test_language_display_name() {
    assert_eq!(Language::Japanese.display_name(), "Japanese");
}

#[test]
fn test_provider_serde_names() {
    assert_eq!(serde_json::to_value(Provider::OpenAi).unwrap(), "openai");
    assert_eq!(serde_json::to_value(Provider::OpenRouter).unwrap(), "openrouter");
}
