//! # htmllint_ast
//!
//! AST definitions for htmllint.
//!
//! This crate provides the location-exact tree that HTML documents are
//! converted into. Every node carries a byte range into the original text and
//! a line/column location, and element and comment nodes expose synthetic
//! sub-nodes for their tag boundaries so diagnostics and fixes can target
//! exact slices of the source.
//!
//! ## Example
//!
//! ```rust
//! use htmllint_ast::{Node, NodeType, Program};
//!
//! let program = Program::from_root(Node::program(), "");
//! assert!(program.body.is_empty());
//! assert_eq!(NodeType::from_raw_kind("#document"), NodeType::Program);
//! ```

mod node;
mod node_type;
mod program;
mod span;
pub mod visitor;
mod visitor_keys;

pub use node::{
    Attribute, CommentData, DocumentTypeData, ElementData, Node, NodeData, SubNode, TextData,
};
pub use node_type::NodeType;
pub use program::{Program, Token};
pub use span::{Location, NodeLocation, Position, Span};
pub use visitor_keys::{VisitorKeys, keys_for};

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor};
