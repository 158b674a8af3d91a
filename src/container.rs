//! Parsing of message containers into part trees

use crate::compressed_rtf;
use crate::error::{ExtractError, Result};
use crate::types::{Disposition, MessageHeaders, MessagePart, ParsedMessage};
use chrono::DateTime;
use mailparse::{DispositionType, MailHeaderMap, ParsedMail};
use std::panic;
use tracing::{debug, warn};

/// Supported message container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// RFC 5322 / MIME message (`.eml`)
    Eml,
    /// Outlook compound file (`.msg`)
    Msg,
}

impl ContainerKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eml => "EML",
            Self::Msg => "MSG",
        }
    }
}

/// Parse a container without failing.
///
/// On error a single empty `text/plain` leaf is returned together with the
/// error, so the caller can still run the body pipeline.
#[must_use]
pub fn parse_message_container(
    raw: &[u8],
    kind: ContainerKind,
) -> (ParsedMessage, Option<ExtractError>) {
    // The panic hook still prints to stderr; only the unwind is contained
    let parsed = panic::catch_unwind(|| match kind {
        ContainerKind::Eml => parse_eml(raw),
        ContainerKind::Msg => parse_msg(raw),
    })
    .unwrap_or_else(|_| Err(ExtractError::malformed(kind.label(), "parser panicked")));

    match parsed {
        Ok(message) => (message, None),
        Err(e) => {
            warn!("Could not parse {} container: {e}", kind.label());
            (ParsedMessage::empty(), Some(e))
        }
    }
}

/// Parse raw RFC 5322 bytes
pub fn parse_eml(raw: &[u8]) -> Result<ParsedMessage> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(ExtractError::malformed("EML", "message is empty"));
    }

    let parsed =
        mailparse::parse_mail(raw).map_err(|e| ExtractError::malformed("EML", e.to_string()))?;

    let headers = MessageHeaders {
        from: parsed.headers.get_first_value("From").unwrap_or_default(),
        subject: parsed.headers.get_first_value("Subject").unwrap_or_default(),
        date: parsed.headers.get_first_value("Date").unwrap_or_default(),
    };

    let root = mime_to_part(&parsed);
    debug!(
        "Parsed EML: {} with {} top-level parts",
        root.content_type,
        root.children.len()
    );

    Ok(ParsedMessage { root, headers })
}

fn mime_to_part(mail: &ParsedMail) -> MessagePart {
    let content_type = mail.ctype.mimetype.trim().to_lowercase();
    let content_disposition = mail.get_content_disposition();

    let disposition = match content_disposition.disposition {
        DispositionType::Inline => Disposition::Inline,
        DispositionType::Attachment => Disposition::Attachment,
        _ => Disposition::None,
    };
    let filename = content_disposition
        .params
        .get("filename")
        .or_else(|| mail.ctype.params.get("name"))
        .cloned();

    let mut part = MessagePart {
        content_type,
        disposition,
        filename,
        content: None,
        children: mail.subparts.iter().map(mime_to_part).collect(),
    };

    // Only body candidates are worth decoding
    if part.is_leaf() && !part.is_attachment() && part.content_type.starts_with("text/") {
        match mail.get_body() {
            Ok(body) => part.content = Some(body),
            Err(e) => warn!("Could not decode {} part: {e}", part.content_type),
        }
    }

    part
}

/// Parse an Outlook `.msg` compound file
pub fn parse_msg(raw: &[u8]) -> Result<ParsedMessage> {
    let outlook = msg_parser::Outlook::from_slice(raw)
        .map_err(|e| ExtractError::malformed("MSG", e.to_string()))?;

    let mut children = Vec::new();
    if !outlook.body.is_empty() {
        children.push(MessagePart::leaf("text/plain", outlook.body.clone()));
    }
    if let Some(rtf) = decode_rtf_property(&outlook.rtf_compressed) {
        children.push(MessagePart::leaf("text/rtf", rtf));
    }
    for attachment in &outlook.attachments {
        let filename = if attachment.file_name.is_empty() {
            attachment.display_name.clone()
        } else {
            attachment.file_name.clone()
        };
        let mime_type = if attachment.mime_tag.is_empty() {
            "application/octet-stream".to_string()
        } else {
            attachment.mime_tag.to_lowercase()
        };
        children.push(MessagePart::attachment(mime_type, filename));
    }

    let from = if outlook.sender.name.is_empty() {
        outlook.sender.email.clone()
    } else if outlook.sender.email.is_empty() {
        outlook.sender.name.clone()
    } else {
        format!("{} <{}>", outlook.sender.name, outlook.sender.email)
    };

    let headers = MessageHeaders {
        from,
        subject: outlook.subject.clone(),
        date: outlook.headers.date.clone(),
    };

    debug!("Parsed MSG with {} parts", children.len());

    Ok(ParsedMessage {
        root: MessagePart::multipart("multipart/mixed", children),
        headers,
    })
}

/// Hex-encoded, compressed RTF body property to RTF text
fn decode_rtf_property(encoded: &str) -> Option<String> {
    if encoded.is_empty() {
        return None;
    }

    let bytes = hex::decode(encoded.trim())
        .inspect_err(|e| warn!("RTF body property is not valid hex: {e}"))
        .ok()?;
    let rtf = compressed_rtf::decompress(&bytes)
        .inspect_err(|e| warn!("Could not decompress RTF body: {e}"))
        .ok()?;

    Some(String::from_utf8_lossy(&rtf).into_owned())
}

/// `From/Subject/Date` lines placed ahead of a message body
#[must_use]
pub fn header_preamble(headers: &MessageHeaders) -> String {
    let date = DateTime::parse_from_rfc2822(headers.date.trim())
        .map_or_else(|_| headers.date.clone(), |dt| dt.to_rfc3339());

    format!(
        "From: {}\nSubject: {}\nDate: {}\n\n",
        headers.from, headers.subject, date
    )
}
