//! Reply, signature and disclaimer cleanup for message bodies
//!
//! Cleanup runs in four stages, each on the output of the previous one:
//!
//! 1. Quoted replies: everything from the first quote marker line is dropped.
//! 2. Signatures: everything from the first signature opener is dropped.
//! 3. Disclaimers: dropped only when enough text follows the marker.
//! 4. Runs of three or more newlines collapse to a single blank line.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Default number of characters a disclaimer must span before it is cut
pub const DEFAULT_DISCLAIMER_MIN_TAIL: usize = 200;

/// Line patterns that open a quoted reply (English and Russian mail clients)
static QUOTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\s*>",
        r"(?i)^\s*On\s.+\swrote:\s*$",
        r"(?i)^\s*(?:From|Sent|To|Subject|От|Кому|Тема|Отправлено):",
        r"(?i)^.*написал(?:а|\(а\))?:\s*$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static SIGNATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:--|—)[ \t]*$|^[ \t]*(?:с уважением|с наилучшими пожеланиями|best regards|kind regards|regards)\b[[:punct:]]*",
    )
    .unwrap()
});

static DISCLAIMER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\bdisclaimer\b|\bthis\s+e-?mail\b.*?\bconfidential|это\s+сообщение\s+может\s+содержать\s+конфиденциальную\s+информацию",
    )
    .unwrap()
});

static BLANK_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Message body cleanup with a configurable disclaimer guard
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    disclaimer_min_tail: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DISCLAIMER_MIN_TAIL)
    }
}

impl Normalizer {
    #[must_use]
    pub const fn new(disclaimer_min_tail: usize) -> Self {
        Self {
            disclaimer_min_tail,
        }
    }

    /// Run all four cleanup stages in order.
    ///
    /// Stages 1-3 repeat until the text stops changing: a disclaimer cut
    /// can end the text on a line that opens a quote or a signature.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut text = self.strip_markers(text);
        loop {
            let next = self.strip_markers(&text);
            if next == text {
                break;
            }
            text = next;
        }
        collapse_blank_lines(&text)
    }

    fn strip_markers(&self, text: &str) -> String {
        let text = strip_quoted(text);
        let text = strip_signature(&text);
        strip_disclaimer(&text, self.disclaimer_min_tail)
    }
}

/// Normalize with the default disclaimer guard
#[must_use]
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// Stage 1: keep the lines before the first quote marker
#[must_use]
pub fn strip_quoted(text: &str) -> String {
    let mut kept = Vec::new();
    for line in text.lines() {
        if QUOTE_PATTERNS.iter().any(|pattern| pattern.is_match(line)) {
            debug!("Quote marker found, dropping the rest of the message");
            break;
        }
        kept.push(line);
    }
    kept.join("\n").trim().to_string()
}

/// Stage 2: cut at the first signature opener
#[must_use]
pub fn strip_signature(text: &str) -> String {
    SIGNATURE_REGEX.find(text).map_or_else(
        || text.to_string(),
        |found| {
            debug!("Signature marker at byte {}", found.start());
            text[..found.start()].trim_end().to_string()
        },
    )
}

/// Stage 3: cut at the first disclaimer marker, but only when more than
/// `min_tail` characters follow it
#[must_use]
pub fn strip_disclaimer(text: &str, min_tail: usize) -> String {
    if let Some(found) = DISCLAIMER_REGEX.find(text) {
        let tail = text[found.start()..].chars().count();
        if tail > min_tail {
            debug!("Disclaimer marker with {tail} trailing chars, truncating");
            return text[..found.start()].trim_end().to_string();
        }
    }
    text.to_string()
}

/// Stage 4: cap blank-line runs at one blank line
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_REGEX.replace_all(text, "\n\n").into_owned()
}
