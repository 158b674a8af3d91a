//! HTML to plain text conversion

use scraper::{ElementRef, Html};

/// Elements dropped together with everything inside them
const SKIPPED: &[&str] = &["style", "script", "head", "title", "meta"];

const BLOCK: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "br",
    "caption",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Convert an HTML document or fragment to plain text.
///
/// Each block-level element starts a new line; whitespace inside a line is
/// collapsed and blank lines are dropped. Entities are decoded by the parser,
/// and malformed markup degrades to whatever text the parser recovers.
#[must_use]
pub fn to_plain_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut lines = Vec::new();
    let mut current = String::new();
    collect_text(document.root_element(), &mut lines, &mut current);
    flush_line(&mut lines, &mut current);

    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            current.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED.contains(&name) {
                continue;
            }

            let is_block = BLOCK.contains(&name);
            if is_block {
                flush_line(lines, current);
            }
            collect_text(child_element, lines, current);
            if is_block {
                flush_line(lines, current);
            }
        }
    }
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
