//! Low-level HTML building
//!
//! `HtmlWriter` appends markup to a string buffer through a small set of primitives: open a tag,
//! add attributes, finish the tag, write text, close the tag. Every attribute value and every
//! piece of text goes through [`escape`], so callers cannot forget it.
//!
//! ```ignore
//! let mut writer = HtmlWriter::new();
//! writer.start_tag("a")?;
//! writer.attribute("href", "/teams?id=1&season=2")?;
//! writer.finish_tag()?;
//! writer.text("Fixtures")?;
//! writer.end_tag("a")?;
//! assert_eq!(writer.into_string(), r#"<a href="/teams?id=1&amp;season=2">Fixtures</a>"#);
//! ```

use crate::error::{ContentError, ContentResult};
use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'`.
pub fn escape(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

#[derive(Debug, Default)]
pub struct HtmlWriter {
    buffer: String,
    /// Whether a start tag is waiting for its closing `>`
    tag_opened: bool,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes any pending start tag and returns the markup.
    pub fn into_string(mut self) -> String {
        self.close_pending();
        self.buffer
    }

    fn close_pending(&mut self) {
        if self.tag_opened {
            self.buffer.push('>');
            self.tag_opened = false;
        }
    }

    pub fn start_tag(&mut self, tag_name: &str) -> ContentResult<()> {
        self.close_pending();
        self.buffer.push('<');
        self.buffer.push_str(tag_name);
        self.tag_opened = true;
        Ok(())
    }

    pub fn attribute(&mut self, key: &str, value: &str) -> ContentResult<()> {
        self.require_open_tag(key)?;
        self.buffer.push(' ');
        self.buffer.push_str(key);
        self.buffer.push_str("=\"");
        self.buffer.push_str(&escape(value));
        self.buffer.push('"');
        Ok(())
    }

    /// A boolean attribute such as `controls` or `allowfullscreen`.
    pub fn flag(&mut self, key: &str) -> ContentResult<()> {
        self.require_open_tag(key)?;
        self.buffer.push(' ');
        self.buffer.push_str(key);
        Ok(())
    }

    fn require_open_tag(&self, key: &str) -> ContentResult<()> {
        if self.tag_opened {
            Ok(())
        } else {
            Err(ContentError::InvalidMarkup(format!(
                "cannot write attribute '{key}': no tag is currently open"
            )))
        }
    }

    pub fn finish_tag(&mut self) -> ContentResult<()> {
        self.close_pending();
        Ok(())
    }

    pub fn end_tag(&mut self, tag_name: &str) -> ContentResult<()> {
        self.close_pending();
        self.buffer.push_str("</");
        self.buffer.push_str(tag_name);
        self.buffer.push('>');
        Ok(())
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) -> ContentResult<()> {
        self.close_pending();
        self.buffer.push_str(&escape(text));
        Ok(())
    }

    /// Markup written verbatim. Only for fixed strings such as `&nbsp;`.
    pub fn raw(&mut self, markup: &str) -> ContentResult<()> {
        self.close_pending();
        self.buffer.push_str(markup);
        Ok(())
    }
}
