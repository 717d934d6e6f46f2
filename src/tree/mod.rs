//! The document tree
//!
//!     An article body as produced by the editor: a root whose `children` are block nodes, each
//!     of which may hold further nodes. The tree is only ever read here.
//!
//!     {
//!       "root": {
//!         "children": [
//!           { "type": "heading", "tag": "h2", "children": [{ "type": "text", "text": "Match report" }] },
//!           { "type": "paragraph", "children": [{ "type": "text", "text": "Hello & welcome", "format": 1 }] }
//!         ]
//!       }
//!     }
//!
//!     See [`nodes`] for the full list of node kinds and [`visitor`] for traversal.

mod de;
pub mod format;
pub mod nodes;
pub mod visitor;

pub use format::{Alignment, TextFormat};
pub use nodes::*;
pub use visitor::{walk, Visitor};

use crate::error::ContentResult;
use serde::Deserialize;
use serde_json::Value;

/// Trees nesting deeper than this are refused by the serializer and the text walker.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Document {
    pub root: Root,
}

/// The root node. `children` is required: a root without it is not a document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            root: Root { children },
        }
    }

    pub fn from_value(value: &Value) -> ContentResult<Self> {
        Ok(Document::deserialize(value)?)
    }

    pub fn from_json(source: &str) -> ContentResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn children(&self) -> &[Node] {
        &self.root.children
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Walk every node in document order.
    pub fn accept(&self, visitor: &mut dyn Visitor, max_depth: usize) -> ContentResult<()> {
        walk(self.children(), visitor, max_depth)
    }
}
