//! Error types for the pagebrief protocol layer.

mod platform;
mod provider;
mod summarize;

pub use platform::*;
pub use provider::*;
pub use summarize::*;
