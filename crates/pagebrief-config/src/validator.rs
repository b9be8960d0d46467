//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::{Config, DeliveryStrategy};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_endpoints(config, &mut result);
        Self::validate_delivery(config, &mut result);
        Self::validate_surface(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    /// Validate and turn the first error into a `ConfigError`.
    pub fn ensure_valid(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = Self::validate(config)?;
        if result.errors.is_empty() {
            return Ok(result);
        }
        let first = result.errors.remove(0);
        Err(ConfigError::InvalidValue {
            field: first.path,
            message: first.message,
        })
    }

    fn validate_endpoints(config: &Config, result: &mut ValidationResult) {
        let endpoints = [
            ("endpoints.openai_url", &config.endpoints.openai_url),
            ("endpoints.openrouter_url", &config.endpoints.openrouter_url),
        ];
        for (path, raw) in endpoints {
            match Url::parse(raw) {
                Ok(url) if url.scheme() == "https" => {}
                Ok(url) if url.scheme() == "http" => {
                    result.add_warning(ValidationWarning::new(
                        path,
                        "endpoint is not https, the API key will be sent in clear text",
                    ));
                }
                Ok(_) => result.add_error(ValidationError::new(
                    path,
                    "endpoint must start with http:// or https://",
                )),
                Err(e) => result.add_error(ValidationError::new(path, format!("invalid URL: {}", e))),
            }
        }

        if config.endpoints.app_title.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "endpoints.app_title",
                "app_title is empty, requests will carry a blank X-Title header",
            ));
        }
    }

    fn validate_delivery(config: &Config, result: &mut ValidationResult) {
        let delivery = &config.delivery;
        if delivery.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "delivery.max_attempts",
                "max_attempts must be at least 1",
            ));
        }

        if delivery.max_attempts > 20 {
            result.add_warning(ValidationWarning::new(
                "delivery.max_attempts",
                "max_attempts is very high (>20), failed deliveries will take long to notify",
            ));
        }

        if delivery.ready_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "delivery.ready_timeout_ms",
                "ready_timeout_ms must be greater than 0",
            ));
        }

        if delivery.strategy == DeliveryStrategy::Retry && delivery.base_delay_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "delivery.base_delay_ms",
                "retry strategy with no initial delay will usually race the result window",
            ));
        }
    }

    fn validate_surface(config: &Config, result: &mut ValidationResult) {
        if config.surface.width == 0 {
            result.add_error(ValidationError::new("surface.width", "width cannot be 0"));
        }
        if config.surface.height == 0 {
            result.add_error(ValidationError::new("surface.height", "height cannot be 0"));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.logging.level.to_ascii_lowercase();
        if !valid_levels.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
