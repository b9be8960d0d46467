//! Extracted page content.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of page text an extraction may return.
pub const MAX_PAGE_TEXT_CHARS: usize = 10_000;

/// Title, URL and cleaned text of a page.
///
/// Created fresh for every extraction and owned by the in-flight request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub url: String,
    pub text: String,
}

impl PageContent {
    pub fn new(title: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Truncate `text` to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
