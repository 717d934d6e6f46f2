//! Smart excerpts
//!
//! An excerpt should read like the article's opening prose rather than its headings or
//! captions. Paragraph and quote text is tried first; when it is too thin for the requested
//! length, headings are mixed back in (in document order), and as a last resort the full text
//! is used.

use super::tree::{document_text, selected_text};
use super::truncate::truncate;
use super::MaxLength;
use crate::error::ContentResult;
use crate::tree::{Document, Node};

/// Prose must fill at least this share of the requested length to be used on its own.
const PROSE_COVERAGE: f64 = 0.5;

fn is_prose(node: &Node) -> bool {
    matches!(node, Node::Paragraph(_) | Node::Quote(_))
}

fn is_prose_or_heading(node: &Node) -> bool {
    is_prose(node) || matches!(node, Node::Heading(_))
}

pub fn smart_excerpt(doc: &Document, max: usize, max_depth: usize) -> ContentResult<String> {
    let prose = selected_text(doc, is_prose, max_depth)?;
    let source = if prose.chars().count() as f64 >= max as f64 * PROSE_COVERAGE {
        prose
    } else {
        let with_headings = selected_text(doc, is_prose_or_heading, max_depth)?;
        if with_headings.is_empty() {
            document_text(doc, max_depth)?
        } else {
            with_headings
        }
    };
    Ok(truncate(&source, MaxLength::Chars(max)))
}
