//! Resolving untyped input into [`Content`]
//!
//! Callers hand us whatever they stored: an HTML string rendered earlier, the editor's tree as
//! a JSON value (or as a string holding that JSON), or a record whose `body` field holds one of
//! those. Everything else resolves to [`Content::Empty`] and is reported to the diagnostic sink.
//!
//! | Input | Content |
//! |-------|---------|
//! | `null` | `Empty` |
//! | `"<p>..</p>"` | `Html` |
//! | `"{\"root\":{..}}"` | `Tree` |
//! | `{ "root": { "children": [..] } }` | `Tree` |
//! | `{ "body": <any of the above> }` | resolved recursively |
//! | anything else | `Empty` (reported) |

use crate::diagnostics::{DiagnosticSink, LogSink, Stage};
use crate::error::{ContentError, ContentResult};
use crate::html::HtmlSerializer;
use crate::text;
use crate::tree::Document;
use serde_json::Value;
use std::borrow::Cow;

/// `body` wrappers are unwrapped at most this many times.
const MAX_BODY_NESTING: usize = 8;

/// Article content in one of the shapes this crate understands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content<'a> {
    #[default]
    Empty,
    /// Pre-rendered HTML
    Html(Cow<'a, str>),
    /// The editor's document tree
    Tree(Cow<'a, Document>),
}

impl<'a> Content<'a> {
    /// Resolve an untyped value, logging anything that had to be discarded.
    pub fn resolve(value: &'a Value) -> Self {
        Self::resolve_with(value, &LogSink)
    }

    pub fn resolve_with(value: &'a Value, sink: &dyn DiagnosticSink) -> Self {
        resolve_value(value, 0).unwrap_or_else(|err| {
            sink.report(Stage::Resolve, &err);
            Content::Empty
        })
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Empty => true,
            Content::Html(html) => html.trim().is_empty(),
            Content::Tree(doc) => doc.is_empty(),
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Content::Tree(doc) => Some(doc.as_ref()),
            _ => None,
        }
    }

    /// The HTML form: pre-rendered HTML as is, trees serialized.
    pub fn to_html(&self) -> Cow<'_, str> {
        self.to_html_with(&HtmlSerializer::new())
    }

    /// [`Content::to_html`] with a configured serializer.
    pub fn to_html_with(&self, serializer: &HtmlSerializer) -> Cow<'_, str> {
        match self {
            Content::Empty => Cow::Borrowed(""),
            Content::Html(html) => Cow::Borrowed(html.as_ref()),
            Content::Tree(doc) => Cow::Owned(serializer.render(doc)),
        }
    }

    /// The full plain text, whitespace collapsed.
    pub fn plain_text(&self) -> String {
        self.plain_text_with(&HtmlSerializer::new())
    }

    /// [`Content::plain_text`] under the serializer's depth limit. A tree too deep to walk
    /// yields `""` and is reported to the serializer's sink.
    pub fn plain_text_with(&self, serializer: &HtmlSerializer) -> String {
        self.try_plain_text(serializer.options().max_depth)
            .unwrap_or_else(|err| {
                serializer.sink().report(Stage::Extract, &err);
                String::new()
            })
    }

    pub fn try_plain_text(&self, max_depth: usize) -> ContentResult<String> {
        match self {
            Content::Empty => Ok(String::new()),
            Content::Html(html) => Ok(text::html::html_to_text(html)),
            Content::Tree(doc) => text::tree::document_text(doc, max_depth),
        }
    }
}

fn resolve_value(value: &Value, depth: usize) -> ContentResult<Content<'_>> {
    match value {
        Value::Null => Ok(Content::Empty),
        Value::String(source) => Ok(resolve_str(source)),
        Value::Object(fields) => {
            if fields.contains_key("root") {
                let doc = Document::from_value(value)?;
                Ok(Content::Tree(Cow::Owned(doc)))
            } else if let Some(body) = fields.get("body") {
                if depth >= MAX_BODY_NESTING {
                    return Err(ContentError::UnsupportedShape(
                        "body wrappers nest too deeply",
                    ));
                }
                resolve_value(body, depth + 1)
            } else {
                Err(ContentError::UnsupportedShape(
                    "object without a root or body field",
                ))
            }
        }
        Value::Array(_) => Err(ContentError::UnsupportedShape("array")),
        Value::Bool(_) => Err(ContentError::UnsupportedShape("boolean")),
        Value::Number(_) => Err(ContentError::UnsupportedShape("number")),
    }
}

/// Strings holding a serialized tree are decoded; any other string is HTML.
fn parse_tree_json(source: &str) -> Option<Document> {
    if !source.trim_start().starts_with('{') {
        return None;
    }
    match Document::from_json(source) {
        Ok(doc) => Some(doc),
        Err(err) => {
            log::debug!("string looked like a serialized tree but is not one ({err}), treating it as HTML");
            None
        }
    }
}

fn resolve_str(source: &str) -> Content<'_> {
    match parse_tree_json(source) {
        Some(doc) => Content::Tree(Cow::Owned(doc)),
        None => Content::Html(Cow::Borrowed(source)),
    }
}

impl<'a> From<&'a Value> for Content<'a> {
    fn from(value: &'a Value) -> Self {
        Content::resolve(value)
    }
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(source: &'a str) -> Self {
        resolve_str(source)
    }
}

impl From<String> for Content<'static> {
    fn from(source: String) -> Self {
        match parse_tree_json(&source) {
            Some(doc) => Content::Tree(Cow::Owned(doc)),
            None => Content::Html(Cow::Owned(source)),
        }
    }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(source: &'a String) -> Self {
        resolve_str(source)
    }
}

impl<'a> From<&'a Document> for Content<'a> {
    fn from(doc: &'a Document) -> Self {
        Content::Tree(Cow::Borrowed(doc))
    }
}

impl From<Document> for Content<'static> {
    fn from(doc: Document) -> Self {
        Content::Tree(Cow::Owned(doc))
    }
}

impl<'a, 'b: 'a> From<&'a Content<'b>> for Content<'a> {
    fn from(content: &'a Content<'b>) -> Self {
        match content {
            Content::Empty => Content::Empty,
            Content::Html(html) => Content::Html(Cow::Borrowed(html.as_ref())),
            Content::Tree(doc) => Content::Tree(Cow::Borrowed(doc.as_ref())),
        }
    }
}
