//! Header value sanitization.

/// Strip everything that cannot appear in an HTTP header value.
///
/// Keys pasted from web pages or password managers tend to carry zero-width
/// spaces, non-breaking spaces or line breaks. Only printable ASCII survives,
/// then surrounding whitespace is trimmed.
pub fn sanitize_header_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key_unchanged() {
        assert_eq!(sanitize_header_value("sk-or-v1-abc123"), "sk-or-v1-abc123");
    }

    #[test]
    fn test_strips_zero_width_and_nbsp() {
        assert_eq!(sanitize_header_value("\u{200B}sk-abc\u{00A0}"), "sk-abc");
    }

    #[test]
    fn test_strips_control_chars_and_trims() {
        assert_eq!(sanitize_header_value("  sk-abc\r\n\t"), "sk-abc");
        assert_eq!(sanitize_header_value("sk-\u{7f}abc"), "sk-abc");
    }

    #[test]
    fn test_only_junk_becomes_empty() {
        assert_eq!(sanitize_header_value("\u{200B}\u{FEFF} \n"), "");
    }

    #[test]
    fn test_inner_spaces_kept() {
        assert_eq!(sanitize_header_value("a b"), "a b");
    }
}
