//! Common types used across pagebrief.

mod ids;
mod message;
mod page;
mod request;
mod settings;

pub use ids::*;
pub use message::*;
pub use page::*;
pub use request::*;
pub use settings::*;
