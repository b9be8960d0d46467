//! AI provider protocol definitions.
//!
//! The AI client turns settings plus page content (or a raw prompt) into a
//! reply text. The model catalog lists selectable models per provider.

mod model;
mod traits;

pub use model::*;
pub use traits::*;
