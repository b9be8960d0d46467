use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(
        config.endpoints.openai_url,
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(
        config.endpoints.openrouter_url,
        "https://openrouter.ai/api/v1/chat/completions"
    );
    assert_eq!(config.endpoints.app_title, "AI Web Summarizer");
}

#[test]
fn test_delivery_config_default() {
    let delivery = DeliveryConfig::default();
    assert_eq!(delivery.strategy, DeliveryStrategy::Handshake);
    assert_eq!(delivery.max_attempts, 3);
    assert_eq!(delivery.base_delay(), Duration::from_millis(100));
    assert_eq!(delivery.delay_step(), Duration::from_millis(50));
    assert_eq!(delivery.ready_timeout(), Duration::from_secs(10));
}

#[test]
fn test_surface_config_default() {
    let surface = SurfaceConfig::default();
    assert_eq!(surface.width, 600);
    assert_eq!(surface.height, 700);
}

#[test]
fn test_extraction_default_is_inject() {
    assert_eq!(ExtractionConfig::default().method, ExtractionMethod::Inject);
}

#[test]
fn test_storage_and_logging_defaults() {
    assert_eq!(StorageConfig::default().path, "~/.pagebrief/storage.json");
    assert_eq!(LoggingConfig::default().level, "info");
    assert_eq!(LoggingConfig::default().dir, "~/.pagebrief/logs");
}

#[test]
fn test_strategy_serde_names() {
    assert_eq!(
        serde_json::to_value(DeliveryStrategy::Retry).unwrap(),
        "retry"
    );
    assert_eq!(
        serde_json::to_value(ExtractionMethod::ContentScript).unwrap(),
        "content_script"
    );
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("openrouter.ai"));
    assert!(json.contains("handshake"));
}
