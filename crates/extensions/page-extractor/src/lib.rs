//! Page extraction for pagebrief.
//!
//! Turns an HTML document into [`PageContent`](pagebrief_protocols::PageContent):
//! title, URL and the readable body text with page chrome (navigation,
//! banners, sidebars, ads, scripts) removed.

mod extractor;
mod loader;

pub use extractor::{extract, is_unwanted, UNWANTED_SELECTORS};
pub use loader::PageLoader;
