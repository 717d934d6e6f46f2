//! HTML output
//!
//!     The serializer walks a [`Document`](crate::tree::Document) and writes a fragment through
//!     [`writer::HtmlWriter`], which escapes every attribute value and text run. See
//!     [`serializer`] for the node-by-node mapping.

pub mod serializer;
pub mod writer;

pub use serializer::{HtmlSerializer, SerializerOptions};
pub use writer::{escape, HtmlWriter};

use crate::content::Content;
use serde_json::Value;

/// Serialize stored article content to HTML.
///
/// Only document trees are serialized. Pre-rendered HTML strings, `null` and shapes that are
/// not documents all yield `""`; a string holding the JSON of a tree is parsed first.
pub fn serialize_to_html(input: &Value) -> String {
    match Content::resolve(input) {
        Content::Tree(doc) => HtmlSerializer::new().render(&doc),
        Content::Html(_) => {
            log::debug!("input is already HTML, nothing to serialize");
            String::new()
        }
        Content::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_to_html_input_shapes() {
        assert_eq!(serialize_to_html(&Value::Null), "");
        assert_eq!(serialize_to_html(&json!("<p>Plain HTML</p>")), "");
        assert_eq!(serialize_to_html(&json!(12)), "");
        assert_eq!(serialize_to_html(&json!({ "root": {} })), "");
        assert_eq!(serialize_to_html(&json!({ "root": { "children": [] } })), "");
    }

    #[test]
    fn test_serialize_to_html_tree() {
        let input = json!({ "root": { "children": [
            { "type": "paragraph", "children": [{ "type": "text", "text": "Hello & welcome" }] }
        ] } });
        assert_eq!(
            serialize_to_html(&input),
            r#"<p style="text-align: left;">Hello &amp; welcome</p>"#
        );
        let wrapped = json!({ "body": input.to_string() });
        assert_eq!(
            serialize_to_html(&wrapped),
            r#"<p style="text-align: left;">Hello &amp; welcome</p>"#
        );
    }
}
