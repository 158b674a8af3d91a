//! Raw text extraction for document formats
//!
//! These formats are handed to their parsing library as-is; their text is
//! returned without any cleanup.

use crate::error::{ExtractError, Result};
use calamine::{Reader, Xls, Xlsx};
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Run a decoder, turning a panic inside it into a `DecodeFailure`.
///
/// The process panic hook is left alone, so the panic message still reaches
/// stderr. Swapping the hook here would race with other batch workers.
fn guarded<F>(format: &str, decode: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    panic::catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "decoder panicked".to_string());
        Err(ExtractError::decode(format, reason))
    })
}

pub fn extract_pdf(data: &[u8]) -> Result<String> {
    guarded("PDF", || {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractError::decode("PDF", e.to_string()))?;
        debug!("PDF extraction: {} chars", text.len());
        Ok(text)
    })
}

/// Body paragraphs of a Word document, one per line
pub fn extract_docx(data: &[u8]) -> Result<String> {
    guarded("DOCX", || {
        let docx =
            docx_rs::read_docx(data).map_err(|e| ExtractError::decode("DOCX", e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        debug!("DOCX extraction: {} paragraphs", paragraphs.len());
        Ok(paragraphs.join("\n"))
    })
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

pub fn extract_xlsx(data: &[u8]) -> Result<String> {
    guarded("XLSX", || {
        let workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(data))
            .map_err(|e: calamine::XlsxError| ExtractError::decode("XLSX", e.to_string()))?;
        first_sheet_text(workbook, "XLSX")
    })
}

pub fn extract_xls(data: &[u8]) -> Result<String> {
    guarded("XLS", || {
        let workbook: Xls<_> = calamine::open_workbook_from_rs(Cursor::new(data))
            .map_err(|e: calamine::XlsError| ExtractError::decode("XLS", e.to_string()))?;
        first_sheet_text(workbook, "XLS")
    })
}

/// First worksheet as tab-separated rows
fn first_sheet_text<RS, R>(mut workbook: R, format: &str) -> Result<String>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractError::decode(format, "workbook has no worksheets"))?
        .map_err(|e| ExtractError::decode(format, e.to_string()))?;

    let rows: Vec<String> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect();

    debug!("{format} extraction: {} rows", rows.len());
    Ok(rows.join("\n"))
}

/// Strict UTF-8 text, without a leading byte order mark
pub fn extract_txt(data: &[u8]) -> Result<String> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    String::from_utf8(data.to_vec()).map_err(|e| ExtractError::decode("TXT", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_guarded_catches_panic() {
        let result = guarded("PDF", || panic!("bad font table"));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
        assert!(err.to_string().contains("bad font table"));
    }

    #[test]
    fn test_guarded_passes_result_through() {
        assert_eq!(guarded("TXT", || Ok("ok".to_string())).unwrap(), "ok");
    }

    #[test]
    fn test_txt_strips_bom() {
        assert_eq!(extract_txt(b"\xEF\xBB\xBFhello").unwrap(), "hello");
    }

    #[test]
    fn test_txt_invalid_utf8() {
        let err = extract_txt(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
        assert!(err.to_string().starts_with("failed to read TXT"));
    }
}
