//! Plain text from a document tree
//!
//! [`TextCollector`] emits the same visible text the HTML serializer writes, with a space on
//! each side of every block, so a tree and its serialized HTML yield the same plain text.

use super::truncate::normalize_whitespace;
use crate::error::ContentResult;
use crate::html::serializer::tweet_link_text;
use crate::tree::{walk, Document, Node, Visitor};

#[derive(Debug, Default)]
pub struct TextCollector {
    buffer: String,
}

impl TextCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected text, whitespace collapsed.
    pub fn finish(self) -> String {
        normalize_whitespace(&self.buffer)
    }
}

impl Visitor for TextCollector {
    fn enter(&mut self, node: &Node) -> bool {
        if node.is_block() {
            self.buffer.push(' ');
        }
        match node {
            Node::Text(text) => self.buffer.push_str(&text.text),
            Node::CodeHighlight(token) => self.buffer.push_str(&token.text),
            Node::Tab => self.buffer.push('\t'),
            Node::Image(image) => {
                if let Some(caption) = &image.caption {
                    self.buffer.push_str(caption);
                }
            }
            Node::Spoiler(spoiler) => {
                self.buffer.push_str(spoiler.summary());
                self.buffer.push(' ');
            }
            Node::Mention(mention) => self.buffer.push_str(&mention.label()),
            Node::Tweet(tweet) => {
                if let Some(link_text) = tweet_link_text(tweet) {
                    self.buffer.push_str(link_text);
                }
            }
            _ => {}
        }
        true
    }

    fn leave(&mut self, node: &Node) {
        if node.is_block() {
            self.buffer.push(' ');
        }
    }
}

/// Collects only the text inside nodes matching `selects`, in document order.
///
/// A selected node's whole subtree is collected once, even when it contains further selected
/// nodes.
pub struct BlockTextCollector<F> {
    selects: F,
    inner: TextCollector,
    open: usize,
}

impl<F: Fn(&Node) -> bool> BlockTextCollector<F> {
    pub fn new(selects: F) -> Self {
        Self {
            selects,
            inner: TextCollector::new(),
            open: 0,
        }
    }

    pub fn finish(self) -> String {
        self.inner.finish()
    }
}

impl<F: Fn(&Node) -> bool> Visitor for BlockTextCollector<F> {
    fn enter(&mut self, node: &Node) -> bool {
        if (self.selects)(node) {
            self.open += 1;
        }
        if self.open > 0 {
            self.inner.enter(node);
        }
        true
    }

    fn leave(&mut self, node: &Node) {
        if self.open > 0 {
            self.inner.leave(node);
        }
        if (self.selects)(node) {
            self.open -= 1;
        }
    }
}

/// The document's full plain text.
pub fn document_text(doc: &Document, max_depth: usize) -> ContentResult<String> {
    let mut collector = TextCollector::new();
    walk(doc.children(), &mut collector, max_depth)?;
    Ok(collector.finish())
}

/// The text of every node matching `selects`, in document order.
pub fn selected_text<F: Fn(&Node) -> bool>(
    doc: &Document,
    selects: F,
    max_depth: usize,
) -> ContentResult<String> {
    let mut collector = BlockTextCollector::new(selects);
    walk(doc.children(), &mut collector, max_depth)?;
    Ok(collector.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use serde_json::json;

    fn doc(children: serde_json::Value) -> Document {
        Document::from_value(&json!({ "root": { "children": children } })).unwrap()
    }

    #[test]
    fn test_blocks_are_separated_inline_is_joined() {
        let doc = doc(json!([
            { "type": "heading", "tag": "h1", "children": [{ "type": "text", "text": "Derby" }] },
            { "type": "paragraph", "children": [
                { "type": "text", "text": "Goal by " },
                { "type": "link", "url": "/p/9", "children": [{ "type": "text", "text": "Nine" }] },
                { "type": "text", "text": "!" }
            ] }
        ]));
        assert_eq!(document_text(&doc, 16).unwrap(), "Derby Goal by Nine!");
    }

    #[test]
    fn test_visible_text_of_leaf_nodes() {
        let doc = doc(json!([
            { "type": "image", "src": "/a.jpg", "caption": "Fans" },
            { "type": "spoiler", "title": "Result", "children": [{ "type": "paragraph", "children": [{ "type": "text", "text": "2-1" }] }] },
            { "type": "paragraph", "children": [{ "type": "mention", "name": "ref" }] },
            { "type": "tweet", "id": "12" },
            { "type": "tweet", "id": "<nope>" },
            { "type": "youtube", "videoID": "abc123" }
        ]));
        assert_eq!(
            document_text(&doc, 16).unwrap(),
            "Fans Result 2-1 @ref View tweet"
        );
    }

    #[test]
    fn test_code_lines_are_separated() {
        let doc = doc(json!([
            { "type": "code", "children": [
                { "type": "code-highlight", "text": "fn" },
                { "type": "text", "text": " main()" },
                { "type": "linebreak" },
                { "type": "text", "text": "end" }
            ] }
        ]));
        assert_eq!(document_text(&doc, 16).unwrap(), "fn main() end");
    }

    #[test]
    fn test_selected_text_collects_each_subtree_once() {
        let doc = doc(json!([
            { "type": "heading", "children": [{ "type": "text", "text": "Skip" }] },
            { "type": "quote", "children": [
                { "type": "paragraph", "children": [{ "type": "text", "text": "inner" }] }
            ] },
            { "type": "paragraph", "children": [{ "type": "text", "text": "outer" }] }
        ]));
        let text = selected_text(
            &doc,
            |node| matches!(node, Node::Paragraph(_) | Node::Quote(_)),
            16,
        )
        .unwrap();
        assert_eq!(text, "inner outer");
    }

    #[test]
    fn test_depth_limit() {
        let mut node = Node::text("deep");
        for _ in 0..4 {
            node = Node::quote(vec![node]);
        }
        let doc = Document::new(vec![node]);
        assert!(matches!(
            document_text(&doc, 3),
            Err(ContentError::DepthExceeded { limit: 3 })
        ));
        assert_eq!(document_text(&doc, 5).unwrap(), "deep");
    }
}
