//! Extraction settings

use crate::error::ConfigError;
use crate::normalize::DEFAULT_DISCLAIMER_MIN_TAIL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cap on returned text, in characters
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 10_000;

/// Settings applied to every file of a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Returned text is cut to this many characters
    pub max_output_chars: usize,

    /// A disclaimer is only stripped when more than this many characters
    /// follow its marker
    pub disclaimer_min_tail: usize,

    /// Prefix message output with its From/Subject/Date headers
    pub include_headers: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
            disclaimer_min_tail: DEFAULT_DISCLAIMER_MIN_TAIL,
            include_headers: false,
        }
    }
}

impl ExtractConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
