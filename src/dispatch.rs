//! Routing of uploaded files to their extractor

use crate::body::{render_body, select_body};
use crate::config::ExtractConfig;
use crate::container::{ContainerKind, header_preamble, parse_message_container};
use crate::error::{ErrorKind, ExtractError, Result};
use crate::extractors::{extract_docx, extract_pdf, extract_txt, extract_xls, extract_xlsx};
use crate::normalize::Normalizer;
use crate::types::ParsedFile;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// File formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    Xlsx,
    Xls,
    Msg,
    Eml,
    Txt,
}

const FORMATS: &[(&str, FileFormat)] = &[
    ("pdf", FileFormat::Pdf),
    ("docx", FileFormat::Docx),
    ("xlsx", FileFormat::Xlsx),
    ("xls", FileFormat::Xls),
    ("msg", FileFormat::Msg),
    ("eml", FileFormat::Eml),
    ("txt", FileFormat::Txt),
];

impl FileFormat {
    /// Look up a lower-cased extension, without the dot
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        FORMATS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
    }

    /// Resolve a file name, or report the rejected extension
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = file_extension(filename);
        Self::from_extension(&extension)
            .ok_or(ExtractError::UnsupportedFormat { extension })
    }

    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(self, Self::Msg | Self::Eml)
    }
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Extract text from one file's bytes with the extractor for `format`.
///
/// Document formats return their library's text untouched; message formats
/// go through body selection and cleanup.
pub fn extract_text(format: FileFormat, data: &[u8], config: &ExtractConfig) -> Result<String> {
    match format {
        FileFormat::Pdf => extract_pdf(data),
        FileFormat::Docx => extract_docx(data),
        FileFormat::Xlsx => extract_xlsx(data),
        FileFormat::Xls => extract_xls(data),
        FileFormat::Txt => extract_txt(data),
        FileFormat::Msg => extract_message(data, ContainerKind::Msg, config),
        FileFormat::Eml => extract_message(data, ContainerKind::Eml, config),
    }
}

/// Container parse, body selection, conversion and cleanup.
///
/// A malformed container is only an error when nothing could be salvaged.
pub fn extract_message(data: &[u8], kind: ContainerKind, config: &ExtractConfig) -> Result<String> {
    let (message, parse_error) = parse_message_container(data, kind);

    let candidate = select_body(&message.root);
    debug!(
        "{} body: {:?}, {} bytes",
        kind.label(),
        candidate.representation,
        candidate.raw_content.len()
    );

    let text = Normalizer::new(config.disclaimer_min_tail).normalize(&render_body(&candidate));

    if let Some(e) = parse_error
        && text.is_empty()
    {
        return Err(e);
    }

    if config.include_headers && !text.is_empty() {
        Ok(format!("{}{text}", header_preamble(&message.headers)))
    } else {
        Ok(text)
    }
}

/// Extract one uploaded file. Never fails; errors are embedded in `text`.
#[must_use]
pub fn extract_file(filename: &str, data: &[u8], config: &ExtractConfig) -> ParsedFile {
    let format = FileFormat::from_filename(filename);
    let is_message = format.as_ref().is_ok_and(|format| format.is_message());

    let result = format.and_then(|format| {
        debug!("Extracting {filename} as {format:?}");
        extract_text(format, data, config)
    });

    finish(filename, result, is_message, config)
}

/// Turn a per-file result into its output form, cutting the text to the
/// configured length
#[must_use]
pub fn finish(
    filename: &str,
    result: Result<String>,
    is_message: bool,
    config: &ExtractConfig,
) -> ParsedFile {
    let (text, kind) = match result {
        Ok(text) if text.is_empty() && is_message => (text, Some(ErrorKind::EmptyBody)),
        Ok(text) => (text, None),
        Err(e) => {
            warn!("Extraction failed for {filename}: {e}");
            (e.to_embedded_text(), Some(e.kind()))
        }
    };

    ParsedFile {
        filename: filename.to_string(),
        text: truncate_chars(&text, config.max_output_chars).to_string(),
        kind,
    }
}

/// Extract many files in parallel; results keep the input order
#[must_use]
pub fn extract_batch<N, D>(files: &[(N, D)], config: &ExtractConfig) -> Vec<ParsedFile>
where
    N: AsRef<str> + Sync,
    D: AsRef<[u8]> + Sync,
{
    files
        .par_iter()
        .map(|(name, data)| extract_file(name.as_ref(), data.as_ref(), config))
        .collect()
}

/// Prefix of `text` holding at most `max_chars` characters
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup_case_insensitive() {
        assert_eq!(FileFormat::from_filename("Report.PDF").unwrap(), FileFormat::Pdf);
        assert_eq!(FileFormat::from_filename("a.b.XLS").unwrap(), FileFormat::Xls);
        assert_eq!(FileFormat::from_filename("mail.Eml").unwrap(), FileFormat::Eml);
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = FileFormat::from_filename("README").unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnsupportedFormat {
                extension: String::new()
            }
        );
        assert_eq!(err.to_string(), "unsupported format: (no extension)");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("привет", 3), "при");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
