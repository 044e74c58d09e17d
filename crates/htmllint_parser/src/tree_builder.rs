//! Builds the AST from a raw tree in one depth-first traversal.

use htmllint_ast::Node;

use crate::node_factory::NodeFactory;
use crate::raw::{RawNode, RawVisitor, walk_raw};

/// Converts a raw tree into an unadjusted AST.
///
/// Every raw node becomes exactly one node, in the same order. Raw nodes
/// without a location become null placeholders for the adjuster to flatten.
pub fn build_tree(source: &str, raw: &RawNode) -> Node {
    let mut builder = TreeBuilder::new(NodeFactory::new(source));
    walk_raw(&mut builder, raw);
    builder.finish()
}

struct TreeBuilder<'s> {
    factory: NodeFactory<'s>,
    stack: Vec<Node>,
    root: Option<Node>,
}

impl<'s> TreeBuilder<'s> {
    fn new(factory: NodeFactory<'s>) -> Self {
        Self {
            factory,
            stack: Vec::new(),
            root: None,
        }
    }

    fn finish(self) -> Node {
        self.root.unwrap_or_else(Node::program)
    }
}

impl<'r> RawVisitor<'r> for TreeBuilder<'_> {
    fn enter(&mut self, node: &'r RawNode) {
        let is_root = self.stack.is_empty();
        self.stack.push(self.factory.create(node, is_root));
    }

    fn exit(&mut self, _node: &'r RawNode) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }
}
