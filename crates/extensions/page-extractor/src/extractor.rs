//! Readable text extraction.
//!
//! The document is parsed into its own tree, so the page being summarized
//! is never modified. Unwanted subtrees are skipped during the walk, which
//! is equivalent to removing them from a copy first.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::error;

use pagebrief_protocols::types::{truncate_chars, PageContent, MAX_PAGE_TEXT_CHARS};

/// Elements whose subtree never contributes to the extracted text.
pub const UNWANTED_SELECTORS: &[&str] = &[
    "script",
    "style",
    "nav",
    "header",
    "footer",
    "aside",
    "iframe",
    "noscript",
    "[role=\"navigation\"]",
    "[role=\"banner\"]",
    "[role=\"complementary\"]",
    ".ad",
    ".advertisement",
    ".sidebar",
    ".menu",
];

static UNWANTED: OnceLock<Option<Selector>> = OnceLock::new();

/// [`UNWANTED_SELECTORS`] compiled into one selector group.
fn unwanted_selector() -> Option<&'static Selector> {
    UNWANTED
        .get_or_init(|| {
            let group = UNWANTED_SELECTORS.join(", ");
            match Selector::parse(&group) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    error!(error = ?e, "Invalid unwanted-element selector, nothing will be removed");
                    None
                }
            }
        })
        .as_ref()
}

/// True when `element` matches any of [`UNWANTED_SELECTORS`].
pub fn is_unwanted(element: &ElementRef<'_>) -> bool {
    unwanted_selector().is_some_and(|selector| selector.matches(element))
}

/// Extract title, URL and cleaned body text from an HTML document.
///
/// Never fails: a document without a `<body>` yields empty text, a missing
/// `<title>` yields an empty title.
pub fn extract(html: &str, url: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = find_element(&document, "title")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut raw = String::new();
    if let Some(body) = find_element(&document, "body") {
        collect_text(body, &mut raw);
    }

    let text = collapse_whitespace(&raw);
    let text = truncate_chars(&text, MAX_PAGE_TEXT_CHARS).to_string();

    PageContent { title, url: url.to_string(), text }
}

fn find_element<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child).filter(|el| !is_unwanted(el)) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
