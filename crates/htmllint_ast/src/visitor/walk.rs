//! Walk functions for AST traversal.

use std::ops::ControlFlow;

use crate::{Node, NodeData};

use super::visit::{VisitResult, Visitor};

/// Walks a node: `enter_node`, the type-specific `visit_*` method, then
/// `exit_node`.
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    match &node.data {
        NodeData::Program => visitor.visit_program(node),
        NodeData::Element(_) => visitor.visit_element(node),
        NodeData::Text(_) => visitor.visit_text(node),
        NodeData::Comment(_) => visitor.visit_comment(node),
        NodeData::DocumentType(_) => visitor.visit_document_type(node),
        NodeData::Null => visitor.visit_null(node),
    }?;

    visitor.exit_node(node)
}

/// Walks all children of a node, stopping early on `ControlFlow::Break`.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in &node.children {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}
