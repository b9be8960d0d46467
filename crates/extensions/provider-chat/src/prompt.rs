//! Prompt construction.

use pagebrief_protocols::types::{truncate_chars, Language, PageContent};

/// Page text beyond this many characters is not sent to the model.
pub const MAX_PROMPT_TEXT_CHARS: usize = 8_000;

/// Instruction appended for non-English output. Empty for English.
pub fn language_instruction(language: Language) -> String {
    match language {
        Language::English => String::new(),
        other => format!("\n\nIMPORTANT: Summary must be in {}.", other.as_str()),
    }
}

/// Summary prompt for an extracted page.
pub fn build_summary_prompt(page: &PageContent, language: Language) -> String {
    format!(
        "Concise plain text summary (no markdown) of: {}\nURL: {}\n\nContent:\n{}{}",
        page.title,
        page.url,
        truncate_chars(&page.text, MAX_PROMPT_TEXT_CHARS),
        language_instruction(language),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> PageContent {
        PageContent::new("Example", "https://ex.com/a", text)
    }

    #[test]
    fn test_english_prompt_has_no_instruction() {
        let prompt = build_summary_prompt(&page("Body text."), Language::English);
        assert_eq!(
            prompt,
            "Concise plain text summary (no markdown) of: Example\nURL: https://ex.com/a\n\nContent:\nBody text."
        );
    }

    #[test]
    fn test_spanish_prompt_ends_with_instruction() {
        let prompt = build_summary_prompt(&page("Body"), Language::Spanish);
        assert!(prompt.ends_with("\n\nIMPORTANT: Summary must be in spanish."));
    }

    #[test]
    fn test_text_is_capped() {
        let long = "a".repeat(MAX_PROMPT_TEXT_CHARS + 500);
        let prompt = build_summary_prompt(&page(&long), Language::English);
        let body = prompt.rsplit("Content:\n").next().unwrap();
        assert_eq!(body.chars().count(), MAX_PROMPT_TEXT_CHARS);
    }

    #[test]
    fn test_cap_respects_multibyte_chars() {
        let long = "é".repeat(MAX_PROMPT_TEXT_CHARS + 1);
        let prompt = build_summary_prompt(&page(&long), Language::French);
        assert!(prompt.contains(&"é".repeat(MAX_PROMPT_TEXT_CHARS)));
        assert!(!prompt.contains(&"é".repeat(MAX_PROMPT_TEXT_CHARS + 1)));
    }
}
