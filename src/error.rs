//! Error types for document extraction

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while extracting text from a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The file extension is not mapped to any extractor
    #[error("unsupported format: {}", display_extension(.extension))]
    UnsupportedFormat { extension: String },

    /// The underlying format library rejected the content
    #[error("failed to read {format}: {reason}")]
    DecodeFailure { format: String, reason: String },

    /// Message container bytes could not be parsed into any structure
    #[error("malformed {format} container: {reason}")]
    MalformedContainer { format: String, reason: String },
}

impl ExtractError {
    pub fn decode(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            format: format.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedContainer {
            format: format.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            Self::MalformedContainer { .. } => ErrorKind::MalformedContainer,
        }
    }

    /// Render as the text embedded in a per-file result, tagged with the kind
    #[must_use]
    pub fn to_embedded_text(&self) -> String {
        format!("[{}] {self}", self.kind())
    }
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(no extension)".to_string()
    } else {
        format!(".{extension}")
    }
}

/// Outcome tags for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnsupportedFormat,
    DecodeFailure,
    /// Not a failure: the message had no body left after cleanup
    EmptyBody,
    MalformedContainer,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedFormat => "UnsupportedFormat",
            Self::DecodeFailure => "DecodeFailure",
            Self::EmptyBody => "EmptyBody",
            Self::MalformedContainer => "MalformedContainer",
        };
        f.write_str(name)
    }
}

/// Errors raised while loading an [`ExtractConfig`](crate::ExtractConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
