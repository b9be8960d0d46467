//! # pagebrief protocols
//!
//! Core protocol definitions for the pagebrief summarizer.
//! Contains only data types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Platform`] - Capability set of the host extension platform
//! - [`Summarizer`] - The AI client seen from the coordinator
//!
//! ## Messages
//!
//! - [`ControlMessage`] - UI surface -> coordinator (and coordinator -> content script)
//! - [`ResultMessage`] - coordinator -> result surface
//! - [`ControlReply`] - direct reply to a control message

pub mod error;
pub mod platform;
pub mod provider;
pub mod sanitize;
pub mod types;

// Re-export core traits
pub use platform::Platform;
pub use provider::{ModelCatalog, ModelEntry, Summarizer};
pub use error::{PlatformError, ProviderError, SummarizeError};
pub use sanitize::sanitize_header_value;
pub use types::*;
