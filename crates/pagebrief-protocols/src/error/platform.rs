//! Platform capability errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// No listener is attached on the receiving side yet.
    #[error("Could not establish connection. Receiving end does not exist: {0}")]
    NoReceiver(String),

    #[error("Tab unreachable: {0}")]
    TabUnreachable(String),

    #[error("Script injection failed: {0}")]
    Injection(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}
