//! The raw tree interface.
//!
//! A standards-compliant tree constructor is an external collaborator. It
//! hands back a [`RawNode`] tree annotated with [`RawLocation`] records; the
//! rest of this crate converts that tree into the htmllint AST.

use std::collections::HashMap;

use htmllint_ast::{Location, NodeLocation, Position, Span};

use crate::{ParseError, TemplateSyntaxSpan};

/// A node as produced by the raw tree constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    /// `#document`, `#document-fragment`, `#text`, `#comment`,
    /// `#documentType`, or an element tag name.
    pub node_name: String,
    /// Text data, comment data, or the doctype name.
    pub value: Option<String>,
    pub attrs: Vec<RawAttribute>,
    /// `None` for nodes the constructor implied without source text.
    pub location: Option<RawLocation>,
    pub children: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

/// A source location as reported by the constructor.
///
/// Lines are 1-based and columns are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSpan {
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Location record of a raw node, with the optional sub-locations of
/// elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLocation {
    pub span: RawSpan,
    pub start_tag: Option<RawSpan>,
    pub end_tag: Option<RawSpan>,
    /// Attribute name to attribute location.
    pub attrs: HashMap<String, RawSpan>,
}

/// Options passed to the tree constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructOptions<'a> {
    /// Template expression spans found in the text, in document order.
    pub templates: &'a [TemplateSyntaxSpan],
    /// Tags whose content must be kept as raw text.
    pub raw_content_tags: &'a [String],
}

/// A raw tree constructor.
///
/// Implementations perform the actual HTML tree construction and report
/// source locations for every node they can attribute to source text.
pub trait TreeConstructor {
    /// Builds the raw tree of `source`; the root must be a document node.
    fn construct(
        &self,
        source: &str,
        options: &ConstructOptions<'_>,
    ) -> Result<RawNode, ParseError>;
}

impl<T: TreeConstructor + ?Sized> TreeConstructor for &T {
    fn construct(
        &self,
        source: &str,
        options: &ConstructOptions<'_>,
    ) -> Result<RawNode, ParseError> {
        (**self).construct(source, options)
    }
}

/// Enter/exit callbacks for a depth-first walk over a raw tree.
pub trait RawVisitor<'r> {
    fn enter(&mut self, node: &'r RawNode);
    fn exit(&mut self, node: &'r RawNode);
}

/// Walks `node` depth-first in document order.
pub fn walk_raw<'r, V: RawVisitor<'r>>(visitor: &mut V, node: &'r RawNode) {
    visitor.enter(node);
    for child in &node.children {
        walk_raw(visitor, child);
    }
    visitor.exit(node);
}

impl RawNode {
    /// Creates a document root.
    pub fn document(children: Vec<RawNode>) -> Self {
        Self {
            node_name: "#document".to_string(),
            children,
            ..Self::default()
        }
    }

    /// Creates a text node.
    pub fn text(value: impl Into<String>, location: RawLocation) -> Self {
        Self {
            node_name: "#text".to_string(),
            value: Some(value.into()),
            location: Some(location),
            ..Self::default()
        }
    }

    /// Creates a comment node.
    pub fn comment(value: impl Into<String>, location: RawLocation) -> Self {
        Self {
            node_name: "#comment".to_string(),
            value: Some(value.into()),
            location: Some(location),
            ..Self::default()
        }
    }

    /// Creates an element node.
    pub fn element(
        tag_name: impl Into<String>,
        attrs: Vec<RawAttribute>,
        location: Option<RawLocation>,
        children: Vec<RawNode>,
    ) -> Self {
        Self {
            node_name: tag_name.into(),
            value: None,
            attrs,
            location,
            children,
        }
    }
}

impl RawAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl RawSpan {
    /// Computes the raw span of `[start, end)` in `source`.
    ///
    /// Columns count bytes from the line start, plus one.
    pub fn from_offsets(source: &str, start: usize, end: usize) -> Self {
        let (start_line, start_col) = line_col(source, start);
        let (end_line, end_col) = line_col(source, end);
        Self {
            start_offset: start,
            end_offset: end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Converts to a node location with 0-based columns.
    pub fn to_location(&self) -> NodeLocation {
        NodeLocation::new(
            Span::new(self.start_offset as u32, self.end_offset as u32),
            Location::new(
                Position::new(self.start_line as u32, self.start_col.saturating_sub(1) as u32),
                Position::new(self.end_line as u32, self.end_col.saturating_sub(1) as u32),
            ),
        )
    }
}

impl RawLocation {
    /// A location with no sub-locations.
    pub fn new(span: RawSpan) -> Self {
        Self {
            span,
            ..Self::default()
        }
    }

    /// Shorthand for [`RawSpan::from_offsets`] wrapped in a location.
    pub fn from_offsets(source: &str, start: usize, end: usize) -> Self {
        Self::new(RawSpan::from_offsets(source, start, end))
    }

    pub fn with_start_tag(mut self, span: RawSpan) -> Self {
        self.start_tag = Some(span);
        self
    }

    pub fn with_end_tag(mut self, span: RawSpan) -> Self {
        self.end_tag = Some(span);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, span: RawSpan) -> Self {
        self.attrs.insert(name.into(), span);
        self
    }
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = source.as_bytes().get(..offset).unwrap_or(source.as_bytes());
    let line = 1 + before.iter().filter(|&&byte| byte == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |newline| newline + 1);
    (line, before.len() - line_start + 1)
}
