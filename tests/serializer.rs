//! Serializer tests over the public API: input shapes, inline formats, blank paragraphs and
//! escaping.

use pressbox::{extract_plain_text, serialize_to_html, Document, HtmlSerializer, MaxLength};
use rstest::rstest;
use serde_json::{json, Value};

fn tree(children: Value) -> Value {
    json!({ "root": { "children": children } })
}

fn paragraph_with(text: Value) -> Value {
    tree(json!([{ "type": "paragraph", "children": [text] }]))
}

#[test]
fn test_hello_and_welcome() {
    let input = paragraph_with(json!({ "type": "text", "text": "Hello & welcome" }));
    assert_eq!(
        serialize_to_html(&input),
        r#"<p style="text-align: left;">Hello &amp; welcome</p>"#
    );
    assert_eq!(extract_plain_text(&input, MaxLength::Unbounded), "Hello & welcome");
}

#[test]
fn test_pre_rendered_html_string() {
    let input = json!("<p>Plain HTML</p>");
    assert_eq!(extract_plain_text(&input, MaxLength::Unbounded), "Plain HTML");
    assert_eq!(serialize_to_html(&input), "");
}

#[test]
fn test_null_serializes_to_empty() {
    assert_eq!(serialize_to_html(&Value::Null), "");
}

#[rstest]
#[case(3, "<strong><em>x</em></strong>")]
#[case(5, "<strong><s>x</s></strong>")]
#[case(9, "<strong><u>x</u></strong>")]
#[case(17, "<strong><code>x</code></strong>")]
#[case(65, "<strong><sup>x</sup></strong>")]
#[case(129, "<strong><sub>x</sub></strong>")]
#[case(6, "<em><s>x</s></em>")]
#[case(10, "<em><u>x</u></em>")]
#[case(18, "<em><code>x</code></em>")]
#[case(66, "<em><sup>x</sup></em>")]
#[case(130, "<em><sub>x</sub></em>")]
#[case(12, "<s><u>x</u></s>")]
#[case(20, "<s><code>x</code></s>")]
#[case(68, "<s><sup>x</sup></s>")]
#[case(132, "<s><sub>x</sub></s>")]
#[case(24, "<u><code>x</code></u>")]
#[case(72, "<u><sup>x</sup></u>")]
#[case(136, "<u><sub>x</sub></u>")]
#[case(80, "<code><sup>x</sup></code>")]
#[case(144, "<code><sub>x</sub></code>")]
#[case(192, "<sup><sub>x</sub></sup>")]
fn test_format_pair_nesting(#[case] format: u32, #[case] expected: &str) {
    let input = paragraph_with(json!({ "type": "text", "text": "x", "format": format }));
    assert_eq!(
        serialize_to_html(&input),
        format!(r#"<p style="text-align: left;">{expected}</p>"#)
    );
}

#[test]
fn test_all_formats_at_once() {
    let input = paragraph_with(json!({ "type": "text", "text": "x", "format": 255 }));
    assert_eq!(
        serialize_to_html(&input),
        r#"<p style="text-align: left;"><strong><em><s><u><code><sup><sub>x</sub></sup></code></u></s></em></strong></p>"#
    );
}

#[rstest]
#[case::left("left", "<p>&nbsp;</p>")]
#[case::absent("", "<p>&nbsp;</p>")]
#[case::center("center", r#"<p style="text-align: center;">&nbsp;</p>"#)]
#[case::justify("justify", r#"<p style="text-align: justify;">&nbsp;</p>"#)]
fn test_blank_paragraph(#[case] alignment: &str, #[case] expected: &str) {
    let input = tree(json!([{
        "type": "paragraph",
        "format": alignment,
        "children": [{ "type": "text", "text": "  \t  " }]
    }]));
    assert_eq!(serialize_to_html(&input), expected);
}

#[test]
fn test_paragraph_without_children_is_blank() {
    let input = tree(json!([{ "type": "paragraph", "children": [] }]));
    assert_eq!(serialize_to_html(&input), "<p>&nbsp;</p>");
}

#[test]
fn test_injection_is_escaped_everywhere() {
    let input = tree(json!([
        { "type": "paragraph", "children": [
            { "type": "text", "text": "<script>alert('x')</script>" },
            { "type": "link", "url": "javascript:\"><img src=x>", "children": [
                { "type": "text", "text": "click" }
            ] }
        ] },
        { "type": "image", "src": "x\" onerror=\"alert(1)", "altText": "<b>'alt'</b>" },
        { "type": "code", "language": "js\"><script>", "children": [{ "type": "text", "text": "</code>" }] }
    ]));
    let html = serialize_to_html(&input);
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img src=x>"));
    assert!(!html.contains("\" onerror"));
    assert!(!html.contains("'alt'"));
    assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    assert!(html.contains("&lt;/code&gt;</code></pre>"));
}

#[test]
fn test_serialize_is_deterministic() {
    let input = tree(json!([
        { "type": "heading", "tag": "h3", "children": [{ "type": "text", "text": "Table" }] },
        { "type": "list", "listType": "number", "children": [
            { "type": "listitem", "value": 1, "children": [{ "type": "text", "text": "one", "format": 1 }] }
        ] }
    ]));
    let doc = Document::from_value(&input).unwrap();
    let serializer = HtmlSerializer::new();
    assert_eq!(serializer.render(&doc), serializer.render(&doc));
    assert_eq!(serializer.render(&doc), serialize_to_html(&input));
}

#[test]
fn test_malformed_shapes_never_panic() {
    for input in [
        json!({ "root": null }),
        json!({ "root": { "children": {} } }),
        json!({ "root": { "children": [1, 2, 3] } }),
        json!({ "root": { "children": [{ "type": "paragraph", "children": "oops" }] } }),
        json!([{ "type": "paragraph" }]),
        json!({ "body": { "body": null } }),
    ] {
        assert_eq!(serialize_to_html(&input), "");
    }
}
