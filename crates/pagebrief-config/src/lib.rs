//! # pagebrief config
//!
//! Host configuration for pagebrief: API endpoints, result delivery policy,
//! extraction method, result window geometry, storage and logging locations.
//!
//! User settings (API key, provider, model, language, speech) are not part
//! of this file; they live in the platform key-value store.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
