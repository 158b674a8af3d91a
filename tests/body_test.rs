use msgtext::*;

fn mixed(children: Vec<MessagePart>) -> MessagePart {
    MessagePart::multipart("multipart/mixed", children)
}

// --- Leaf messages ---

#[test]
fn test_leaf_plain_text() {
    let body = select_body(&MessagePart::leaf("text/plain", "Hello"));
    assert_eq!(body, BodyCandidate::new(Representation::PlainText, "Hello"));
}

#[test]
fn test_leaf_html() {
    let body = select_body(&MessagePart::leaf("text/html", "<p>Hi</p>"));
    assert_eq!(body.representation, Representation::Html);
    assert_eq!(body.raw_content, "<p>Hi</p>");
}

#[test]
fn test_leaf_without_content_is_empty_plain_text() {
    let root = MessagePart {
        content_type: "text/plain".into(),
        ..MessagePart::default()
    };
    let body = select_body(&root);
    assert_eq!(body.representation, Representation::PlainText);
    assert_eq!(body.raw_content, "");
}

#[test]
fn test_leaf_unknown_type_treated_as_plain_text() {
    let body = select_body(&MessagePart::leaf("application/octet-stream", "data"));
    assert_eq!(body.representation, Representation::PlainText);
}

// --- Multipart selection ---

#[test]
fn test_no_body_parts_is_empty() {
    let root = mixed(vec![
        MessagePart::leaf("image/png", "..."),
        MessagePart::attachment("text/plain", "notes.txt"),
    ]);
    assert_eq!(select_body(&root), BodyCandidate::empty());
}

#[test]
fn test_empty_multipart_is_empty() {
    let root = mixed(vec![MessagePart::multipart("multipart/alternative", vec![])]);
    let body = select_body(&root);
    assert_eq!(body.representation, Representation::Empty);
    assert_eq!(body.raw_content, "");
}

#[test]
fn test_plain_text_wins_over_earlier_html() {
    let root = mixed(vec![
        MessagePart::leaf("text/html", "<p>html</p>"),
        MessagePart::leaf("text/plain", "plain"),
    ]);
    let body = select_body(&root);
    assert_eq!(body.representation, Representation::PlainText);
    assert_eq!(body.raw_content, "plain");
}

#[test]
fn test_plain_text_in_later_subtree_wins() {
    let root = mixed(vec![
        MessagePart::multipart(
            "multipart/related",
            vec![MessagePart::leaf("text/html", "<p>html</p>")],
        ),
        MessagePart::multipart(
            "multipart/alternative",
            vec![MessagePart::leaf("text/plain", "plain")],
        ),
    ]);
    assert_eq!(select_body(&root).raw_content, "plain");
}

#[test]
fn test_attachment_never_selected() {
    let root = mixed(vec![
        MessagePart::attachment("text/plain", "log.txt"),
        MessagePart::leaf("text/html", "<p>body</p>"),
    ]);
    let body = select_body(&root);
    assert_eq!(body.representation, Representation::Html);
    assert_eq!(body.raw_content, "<p>body</p>");
}

#[test]
fn test_attachment_without_filename_never_selected() {
    let root = mixed(vec![
        MessagePart::leaf("text/plain", "attached").with_disposition(Disposition::Attachment),
    ]);
    assert_eq!(select_body(&root), BodyCandidate::empty());
}

#[test]
fn test_inline_with_filename_never_selected() {
    let root = mixed(vec![
        MessagePart::leaf("text/plain", "inline file")
            .with_disposition(Disposition::Inline)
            .with_filename("inline.txt"),
        MessagePart::leaf("text/plain", "real body"),
    ]);
    assert_eq!(select_body(&root).raw_content, "real body");
}

#[test]
fn test_rich_text_is_last_resort() {
    let root = mixed(vec![
        MessagePart::leaf("text/rtf", r"{\rtf1 rich}"),
        MessagePart::leaf("text/html", "<p>html</p>"),
    ]);
    assert_eq!(select_body(&root).representation, Representation::Html);

    let root = mixed(vec![MessagePart::leaf("application/rtf", r"{\rtf1 rich}")]);
    let body = select_body(&root);
    assert_eq!(body.representation, Representation::RichText);
    assert_eq!(body.raw_content, r"{\rtf1 rich}");
}

#[test]
fn test_selection_is_deterministic() {
    let root = mixed(vec![
        MessagePart::leaf("text/html", "<p>a</p>"),
        MessagePart::leaf("text/html", "<p>b</p>"),
    ]);
    assert_eq!(select_body(&root), select_body(&root));
}

// --- Rendering ---

#[test]
fn test_render_rich_text() {
    let candidate = BodyCandidate::new(
        Representation::RichText,
        r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Quarterly numbers attached.\par}",
    );
    let text = render_body(&candidate);
    assert!(text.contains("Quarterly numbers attached."));
    assert!(!text.contains("\\par"));
}

#[test]
fn test_html_blockquote_is_not_a_quote_marker() {
    let html = "<html><body><p>Hi</p><blockquote>old</blockquote></body></html>";
    let root = mixed(vec![MessagePart::leaf("text/html", html)]);

    let text = render_body(&select_body(&root));
    assert_eq!(text, "Hi\nold");
    assert_eq!(normalize(&text), "Hi\nold");
}
