//! Text normalization for extracted page content

use regex::Regex;
use std::sync::LazyLock;

/// Runs of two or more newlines
static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Removes every character in U+0080..=U+FFFF
///
/// Characters outside the Basic Multilingual Plane are kept.
pub fn strip_non_ascii(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{0080}'..='\u{FFFF}').contains(c))
        .collect()
}

/// Collapses any run of blank lines into exactly one
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Normalizes a heading into a record title
pub fn normalize_title(raw: &str) -> String {
    strip_non_ascii(raw).trim().to_string()
}

/// Normalizes landmark text into a record body
pub fn normalize_text(raw: &str) -> String {
    collapse_blank_lines(&strip_non_ascii(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_ascii() {
        assert_eq!(strip_non_ascii("caf\u{e9} na\u{ef}ve"), "caf nave");
        assert_eq!(strip_non_ascii("a\u{a0}b"), "ab");
        assert_eq!(strip_non_ascii("\u{2014}dash\u{2014}"), "dash");
        assert_eq!(strip_non_ascii("\u{ffff}end"), "end");
        assert_eq!(strip_non_ascii("plain ASCII ~\x7f"), "plain ASCII ~\x7f");
    }

    #[test]
    fn test_strip_keeps_astral_plane() {
        assert_eq!(strip_non_ascii("ok \u{1F600}\u{e9}"), "ok \u{1F600}");
    }

    #[test]
    fn test_strip_is_total_over_bmp_range() {
        let all: String = (0x80u32..=0xFFFF).filter_map(char::from_u32).collect();
        assert!(strip_non_ascii(&all).is_empty());
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb\n\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let inputs = ["", "\n\n\n", "x\n\n\n\ny", "one\ntwo\n\nthree\n\n\n\n"];
        for input in inputs {
            let once = collapse_blank_lines(input);
            assert_eq!(collapse_blank_lines(&once), once);
            assert!(!once.contains("\n\n\n"));
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Hello \u{2122} "), "Hello");
        assert_eq!(normalize_title("\u{e9}\u{e9}"), "");
    }

    #[test]
    fn test_normalize_text() {
        // Stripping happens before collapsing so removed characters can't hide a run
        assert_eq!(normalize_text("Hello\n\n\u{a0}\n\nWorld"), "Hello\n\nWorld");
        assert_eq!(normalize_text("Hello\n\n\n\nWorld \u{2192}"), "Hello\n\nWorld ");
    }
}
