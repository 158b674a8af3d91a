//! Rich text (RTF) body decoding

use regex::Regex;
use rtf_parser::document::RtfDocument;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;
use tracing::debug;

static CONTROL_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+-?\d* ?").unwrap());

static IGNORABLE_GROUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\\\*[^{}]*\}").unwrap());

static BRACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}]").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode an RTF body to plain text.
///
/// Uses a structured RTF parse first. If that fails (or panics on malformed
/// input) the control sequences are stripped coarsely instead, so this never
/// fails.
#[must_use]
pub fn decode_rich_text(raw: &str) -> String {
    // The panic hook still prints to stderr; only the unwind is contained
    let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
        RtfDocument::try_from(raw).map(|document| document.get_text())
    }));

    match parsed {
        Ok(Ok(text)) => text.trim().to_string(),
        _ => {
            debug!("structured RTF decode failed, stripping control words");
            strip_control_sequences(raw)
        }
    }
}

/// Coarse RTF stripper used when structured decoding is not possible
#[must_use]
pub fn strip_control_sequences(raw: &str) -> String {
    let text = CONTROL_WORD_REGEX.replace_all(raw, "");
    let text = IGNORABLE_GROUP_REGEX.replace_all(&text, "");
    let text = BRACE_REGEX.replace_all(&text, "");
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_control_words() {
        let raw = r"{\rtf1\ansi\deff0 {\fonttbl {\f0 Arial;}}\f0\fs24 Hello \b world\b0 !}";
        let text = strip_control_sequences(raw);
        assert!(text.starts_with("Arial;"));
        assert!(text.ends_with("Hello world!"));
    }

    #[test]
    fn test_strip_ignorable_group() {
        let raw = r"{\rtf1{\*\generator Msftedit 5.41;}Body text\par}";
        assert_eq!(strip_control_sequences(raw), "Body text");
    }

    #[test]
    fn test_strip_negative_parameter() {
        let raw = r"{\rtf1\li-360 Indented}";
        assert_eq!(strip_control_sequences(raw), "Indented");
    }

    #[test]
    fn test_strip_never_fails_on_garbage() {
        assert_eq!(strip_control_sequences("}}}{{\\\\ \n\t"), "\\\\");
        assert_eq!(strip_control_sequences(""), "");
    }

    #[test]
    fn test_decode_rich_text_contains_body() {
        let raw = r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello there.\par}";
        let text = decode_rich_text(raw);
        assert!(text.contains("Hello there."));
        assert!(!text.contains("\\pard"));
    }

    #[test]
    fn test_decode_rich_text_malformed() {
        let text = decode_rich_text(r"{\rtf1 unterminated \b group");
        assert!(!text.contains("\\b"));
        assert!(!text.contains('{'));
    }
}
