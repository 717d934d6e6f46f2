//! Property-based tests
//!
//! - serializing is deterministic
//! - user strings never reach the output unescaped
//! - a tree and its serialized HTML yield the same plain text
//! - truncation stays within its bound and only ever cuts a prefix

use pressbox::text::truncate::{normalize_whitespace, truncate};
use pressbox::{extract_plain_text, Document, HtmlSerializer, MaxLength};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Text including every character that needs escaping
fn hostile_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'.,!?;#-]{0,40}"
}

fn inline_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (hostile_text_strategy(), 0u32..256)
            .prop_map(|(text, format)| json!({ "type": "text", "text": text, "format": format })),
        1 => Just(json!({ "type": "linebreak" })),
        1 => Just(json!({ "type": "tab" })),
    ]
}

fn block_strategy() -> impl Strategy<Value = Value> {
    let kind = prop_oneof![
        Just("paragraph"),
        Just("heading"),
        Just("quote"),
        Just("listitem")
    ];
    let alignment = prop_oneof![Just("left"), Just("center"), Just("right"), Just("")];
    (kind, alignment, prop::collection::vec(inline_strategy(), 0..4)).prop_map(
        |(kind, alignment, children)| match kind {
            "listitem" => json!({
                "type": "list",
                "listType": "number",
                "children": [{ "type": "listitem", "children": children }]
            }),
            _ => json!({ "type": kind, "format": alignment, "children": children }),
        },
    )
}

fn document_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(block_strategy(), 0..6)
        .prop_map(|children| json!({ "root": { "children": children } }))
}

proptest! {
    #[test]
    fn test_serialization_is_deterministic(value in document_strategy()) {
        let doc = Document::from_value(&value).unwrap();
        let serializer = HtmlSerializer::new();
        prop_assert_eq!(serializer.render(&doc), serializer.render(&doc));
    }

    #[test]
    fn test_user_strings_are_escaped(
        text in hostile_text_strategy(),
        url in hostile_text_strategy(),
        src in hostile_text_strategy(),
        alt in hostile_text_strategy(),
    ) {
        let value = json!({ "root": { "children": [
            { "type": "paragraph", "children": [
                { "type": "link", "url": url, "children": [
                    { "type": "text", "text": format!("x{text}") }
                ] }
            ] },
            { "type": "image", "src": src, "altText": alt }
        ] } });
        let html = HtmlSerializer::new().render(&Document::from_value(&value).unwrap());

        // <p> <a> </a> </p> <figure> <img> </figure>
        prop_assert_eq!(html.matches('<').count(), 7);
        prop_assert_eq!(html.matches('>').count(), 7);
        // style, href, class, src, alt and loading values
        prop_assert_eq!(html.matches('"').count(), 12);
        prop_assert_eq!(html.matches('\'').count(), 0);
    }

    #[test]
    fn test_tree_and_html_text_agree(value in document_strategy()) {
        let doc = Document::from_value(&value).unwrap();
        let html = HtmlSerializer::new().render(&doc);
        prop_assert_eq!(
            extract_plain_text(&doc, MaxLength::Unbounded),
            extract_plain_text(html.as_str(), MaxLength::Unbounded)
        );
    }

    #[test]
    fn test_truncation_bounds(text in "[a-z ]{0,200}", max in 0usize..120) {
        let text = normalize_whitespace(&text);
        let truncated = truncate(&text, MaxLength::Chars(max));

        if text.chars().count() <= max {
            prop_assert_eq!(&truncated, &text);
        } else {
            prop_assert!(truncated.chars().count() <= max + 3);
            let kept = truncated.strip_suffix("...").unwrap();
            prop_assert!(text.starts_with(kept));
            prop_assert!(kept.chars().count() * 5 >= max * 4 || kept.chars().count() == max);
        }
    }

    #[test]
    fn test_unbounded_never_truncates(text in "[a-zA-Z ]{0,300}") {
        let html = format!("<p>{text}</p>");
        prop_assert_eq!(
            extract_plain_text(html.as_str(), MaxLength::Unbounded),
            normalize_whitespace(&text)
        );
    }
}
