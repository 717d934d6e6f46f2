//! Plain-text extraction
//!
//!     Two paths lead to the same text. HTML strings are stripped with regexes ([`html`]);
//!     document trees are walked directly ([`tree`]), emitting exactly what the serializer would
//!     have made visible. Both collapse whitespace, and both feed the same truncation rule
//!     ([`truncate`]).
//!
//!     Truncation counts characters, prefers the last space when it falls within the final
//!     fifth of the window, and appends `...`.

pub mod excerpt;
pub mod html;
pub mod tree;
pub mod truncate;

use crate::content::Content;
use crate::diagnostics::Stage;
use crate::html::HtmlSerializer;

/// Maximum length of extracted text, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxLength {
    /// Never truncate
    #[default]
    Unbounded,
    Chars(usize),
}

impl From<usize> for MaxLength {
    fn from(chars: usize) -> Self {
        MaxLength::Chars(chars)
    }
}

impl From<Option<usize>> for MaxLength {
    fn from(chars: Option<usize>) -> Self {
        chars.map_or(MaxLength::Unbounded, MaxLength::Chars)
    }
}

/// Plain text of stored content, truncated to `max`.
///
/// Accepts anything that converts into [`Content`]: a JSON value, an HTML or JSON string, or a
/// [`Document`](crate::tree::Document).
pub fn extract_plain_text<'a>(content: impl Into<Content<'a>>, max: impl Into<MaxLength>) -> String {
    extract_plain_text_with(content, max, &HtmlSerializer::new())
}

/// [`extract_plain_text`] under the serializer's depth limit, reporting to its sink.
pub fn extract_plain_text_with<'a>(
    content: impl Into<Content<'a>>,
    max: impl Into<MaxLength>,
    serializer: &HtmlSerializer,
) -> String {
    let content = content.into();
    truncate::truncate(&content.plain_text_with(serializer), max.into())
}

/// An excerpt built from the article's prose, truncated to `max` characters.
///
/// HTML input has no structure to choose from and falls back to [`extract_plain_text`].
pub fn extract_smart_excerpt<'a>(content: impl Into<Content<'a>>, max: usize) -> String {
    extract_smart_excerpt_with(content, max, &HtmlSerializer::new())
}

pub fn extract_smart_excerpt_with<'a>(
    content: impl Into<Content<'a>>,
    max: usize,
    serializer: &HtmlSerializer,
) -> String {
    let content = content.into();
    match content.as_document() {
        Some(doc) => excerpt::smart_excerpt(doc, max, serializer.options().max_depth)
            .unwrap_or_else(|err| {
                serializer.sink().report(Stage::Extract, &err);
                String::new()
            }),
        None => extract_plain_text_with(&content, max, serializer),
    }
}
