//! Visitor trait for traversing AST nodes.
//!
//! Each `visit_*` method has a default implementation that walks children,
//! so implementors override only the node types they care about.

use std::ops::ControlFlow;

use crate::Node;

use super::walk::{walk_children, walk_node};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting children
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing AST nodes without modification.
///
/// `enter_node` and `exit_node` bracket every node, which makes the trait
/// usable as a plain two-callback (enter/exit) traversal.
pub trait Visitor<'a>: Sized {
    /// Called before a node and its children are visited.
    #[inline]
    fn enter_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node and all its children were visited.
    #[inline]
    fn exit_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits any node by dispatching to the type-specific method.
    #[inline]
    fn visit_node(&mut self, node: &'a Node) -> VisitResult {
        walk_node(self, node)
    }

    fn visit_program(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_element(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_text(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_comment(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_document_type(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Null placeholders are transparent: their children are walked.
    fn visit_null(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }
}
