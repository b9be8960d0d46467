//! System notifications for pagebrief.
//!
//! Used when a result cannot reach its window, and to tell the user an API
//! key is needed before anything else happens.

mod notifier;

pub use notifier::{DesktopNotifier, NotifyChannel};
