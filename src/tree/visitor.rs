//! Depth-bounded traversal of the document tree
//!
//! Implement [`Visitor`] to walk a tree. `enter` runs before a node's children and can skip
//! them; `leave` runs after. Default implementations do nothing, so a visitor only overrides
//! what it needs.
//!
//! ```ignore
//! struct ImageCounter(usize);
//!
//! impl Visitor for ImageCounter {
//!     fn enter(&mut self, node: &Node) -> bool {
//!         if let Node::Image(_) = node {
//!             self.0 += 1;
//!         }
//!         true
//!     }
//! }
//! ```

use super::nodes::Node;
use crate::error::{ContentError, ContentResult};

pub trait Visitor {
    /// Return `false` to skip the node's children.
    fn enter(&mut self, _node: &Node) -> bool {
        true
    }

    fn leave(&mut self, _node: &Node) {}
}

/// Walk `nodes` (the root's children are depth 1) in document order.
///
/// Fails with [`ContentError::DepthExceeded`] as soon as a non-empty child list lies deeper than
/// `max_depth`.
pub fn walk(nodes: &[Node], visitor: &mut dyn Visitor, max_depth: usize) -> ContentResult<()> {
    walk_at(nodes, visitor, 1, max_depth)
}

fn walk_at(
    nodes: &[Node],
    visitor: &mut dyn Visitor,
    depth: usize,
    max_depth: usize,
) -> ContentResult<()> {
    if nodes.is_empty() {
        return Ok(());
    }
    if depth > max_depth {
        return Err(ContentError::DepthExceeded { limit: max_depth });
    }
    for node in nodes {
        if visitor.enter(node) {
            walk_at(node.children(), visitor, depth + 1, max_depth)?;
        }
        visitor.leave(node);
    }
    Ok(())
}
