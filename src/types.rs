//! Core types shared by the extraction pipeline

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

/// How a message part asks to be presented
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
    #[default]
    None,
}

impl Disposition {
    /// Parse a `Content-Disposition` type token
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "inline" => Self::Inline,
            "attachment" => Self::Attachment,
            _ => Self::None,
        }
    }
}

/// One node of a structured message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePart {
    /// Lower-cased mimetype, e.g. `text/plain`. Empty when missing.
    pub content_type: String,

    pub disposition: Disposition,

    pub filename: Option<String>,

    /// Decoded content; `None` when absent or never decoded
    pub content: Option<String>,

    /// Sub-parts in document order, empty for leaves
    pub children: Vec<Self>,
}

impl MessagePart {
    pub fn leaf(content_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn multipart(content_type: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            content_type: content_type.into(),
            children,
            ..Self::default()
        }
    }

    /// An attachment part; its content is never needed for body selection
    pub fn attachment(content_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            disposition: Disposition::Attachment,
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Attachments, and inline parts that carry a filename, are never a body
    #[must_use]
    pub const fn is_attachment(&self) -> bool {
        match self.disposition {
            Disposition::Attachment => true,
            Disposition::Inline => self.filename.is_some(),
            Disposition::None => false,
        }
    }

    #[must_use]
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Which representation a body candidate carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Representation {
    PlainText,
    Html,
    RichText,
    Empty,
}

/// The single body representation chosen for a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCandidate {
    pub representation: Representation,
    pub raw_content: String,
}

impl BodyCandidate {
    pub fn new(representation: Representation, raw_content: impl Into<String>) -> Self {
        Self {
            representation,
            raw_content: raw_content.into(),
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            representation: Representation::Empty,
            raw_content: String::new(),
        }
    }
}

/// Summary headers of a message container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageHeaders {
    pub from: String,
    pub subject: String,
    pub date: String,
}

/// A message container parsed into its part tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    pub root: MessagePart,
    pub headers: MessageHeaders,
}

impl ParsedMessage {
    /// Minimal stand-in for an unparsable container
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: MessagePart::leaf("text/plain", ""),
            headers: MessageHeaders::default(),
        }
    }
}

/// Final per-file output
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParsedFile {
    pub filename: String,
    pub text: String,

    /// Set when `text` is an embedded error, or for an empty message body
    #[serde(skip)]
    pub kind: Option<ErrorKind>,
}
