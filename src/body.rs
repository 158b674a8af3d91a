//! Body selection for multipart messages

use crate::html::to_plain_text;
use crate::rtf::decode_rich_text;
use crate::types::{BodyCandidate, MessagePart, Representation};
use tracing::debug;

/// Pick the best body representation from a message tree.
///
/// Plain text wins wherever it appears. Otherwise the first HTML part is
/// used, then the first RTF part. Attachments are skipped without touching
/// their content.
#[must_use]
pub fn select_body(root: &MessagePart) -> BodyCandidate {
    if root.is_leaf() {
        let representation = if root.content_type == "text/html" {
            Representation::Html
        } else {
            Representation::PlainText
        };
        return BodyCandidate::new(representation, root.content_str());
    }

    let mut fallbacks = Fallbacks::default();
    if let Some(plain) = find_plain_text(root, &mut fallbacks) {
        return BodyCandidate::new(Representation::PlainText, plain.content_str());
    }

    if let Some(html) = fallbacks.html {
        BodyCandidate::new(Representation::Html, html.content_str())
    } else if let Some(rich) = fallbacks.rich_text {
        BodyCandidate::new(Representation::RichText, rich.content_str())
    } else {
        BodyCandidate::empty()
    }
}

#[derive(Default)]
struct Fallbacks<'a> {
    html: Option<&'a MessagePart>,
    rich_text: Option<&'a MessagePart>,
}

/// Depth-first, document order. Returns the first `text/plain` part.
fn find_plain_text<'a>(
    part: &'a MessagePart,
    fallbacks: &mut Fallbacks<'a>,
) -> Option<&'a MessagePart> {
    for child in &part.children {
        if child.is_attachment() {
            continue;
        }

        match child.content_type.as_str() {
            "text/plain" => return Some(child),
            "text/html" if fallbacks.html.is_none() => fallbacks.html = Some(child),
            "text/rtf" | "application/rtf" if fallbacks.rich_text.is_none() => {
                fallbacks.rich_text = Some(child);
            }
            _ => {}
        }

        if let Some(found) = find_plain_text(child, fallbacks) {
            return Some(found);
        }
    }
    None
}

/// Convert a body candidate to plain text
#[must_use]
pub fn render_body(candidate: &BodyCandidate) -> String {
    debug!("Rendering {:?} body", candidate.representation);

    match candidate.representation {
        Representation::PlainText => candidate.raw_content.clone(),
        Representation::Html => to_plain_text(&candidate.raw_content),
        Representation::RichText => decode_rich_text(&candidate.raw_content),
        Representation::Empty => String::new(),
    }
}
