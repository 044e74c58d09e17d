//! Visitor pattern for AST traversal.
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`walk_node`] - Dispatch function for type-specific visitors
//! - [`walk_children`] - Traverse all children of a node
//!
//! # Example
//!
//! ```rust
//! use htmllint_ast::{Node, NodeData, TextData};
//! use htmllint_ast::visitor::{Visitor, VisitResult, walk_node};
//! use std::ops::ControlFlow;
//!
//! struct TextCollector<'a> {
//!     texts: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for TextCollector<'a> {
//!     fn visit_text(&mut self, node: &'a Node) -> VisitResult {
//!         if let NodeData::Text(text) = &node.data {
//!             self.texts.push(&text.value);
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut root = Node::program();
//! root.children.push(Node::new(NodeData::Text(TextData::new("hello")), None));
//!
//! let mut collector = TextCollector { texts: Vec::new() };
//! let _ = walk_node(&mut collector, &root);
//! assert_eq!(collector.texts, vec!["hello"]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
