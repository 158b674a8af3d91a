// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Document Text Extraction
//!
//! Extracts readable text from uploaded documents (PDF, Word, Excel, plain
//! text, Outlook `.msg` and raw `.eml` email) and returns it ready for
//! indexing or summarization.
//!
//! Document formats are passed straight to their parsing library. Email
//! formats get more work: the best body part is selected from the MIME tree
//! (plain text, then HTML, then RTF), converted to plain text, and cleaned of
//! quoted replies, signatures and legal disclaimers.
//!
//! # Example
//!
//! ```rust
//! use msgtext::{ExtractConfig, extract_file};
//!
//! let raw = b"From: a@example.com\r\nSubject: Hi\r\n\r\nThanks!\n\n> earlier message";
//! let parsed = extract_file("reply.eml", raw, &ExtractConfig::default());
//!
//! assert_eq!(parsed.text, "Thanks!");
//! ```

mod body;
mod compressed_rtf;
mod config;
mod container;
mod dispatch;
mod error;
mod extractors;
mod html;
mod normalize;
mod rtf;
mod types;

pub use body::{render_body, select_body};
pub use compressed_rtf::decompress as decompress_rtf;
pub use config::{DEFAULT_MAX_OUTPUT_CHARS, ExtractConfig};
pub use container::{ContainerKind, header_preamble, parse_eml, parse_message_container, parse_msg};
pub use dispatch::{
    FileFormat, extract_batch, extract_file, extract_message, extract_text, finish, truncate_chars,
};
pub use error::{ConfigError, ErrorKind, ExtractError, Result};
pub use extractors::{extract_docx, extract_pdf, extract_txt, extract_xls, extract_xlsx};
pub use html::to_plain_text;
pub use normalize::{
    DEFAULT_DISCLAIMER_MIN_TAIL, Normalizer, collapse_blank_lines, normalize, strip_disclaimer,
    strip_quoted, strip_signature,
};
pub use rtf::{decode_rich_text, strip_control_sequences};
pub use types::*;
