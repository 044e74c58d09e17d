//! Node definition.
//!
//! The core AST node type produced by the raw tree conversion.

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::{NodeLocation, NodeType, Span};

/// A node in the HTML AST.
///
/// Every node owns its children. `location` is `None` only for
/// [`NodeType::Null`] placeholders and for a [`NodeType::Program`] root whose
/// location has not been resolved yet; see [`Node::resolved_location`].
///
/// # Example
///
/// ```rust
/// use htmllint_ast::{Location, Node, NodeData, NodeLocation, Position, Span, TextData};
///
/// let location = NodeLocation::new(
///     Span::new(0, 5),
///     Location::new(Position::new(1, 0), Position::new(1, 5)),
/// );
/// let text = Node::new(NodeData::Text(TextData::new("hello")), Some(location));
///
/// let mut root = Node::program();
/// root.children.push(text);
/// assert_eq!(root.resolved_location().range, Span::new(0, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Kind-specific payload.
    pub data: NodeData,

    /// Byte range and line/column location in the source text.
    pub location: Option<NodeLocation>,

    /// Child nodes in document order.
    pub children: Vec<Node>,
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Program,
    Element(Box<ElementData>),
    Text(TextData),
    Comment(Box<CommentData>),
    DocumentType(DocumentTypeData),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name as emitted by the tree constructor.
    pub tag_name: String,
    /// The `<tag ...>` boundary.
    pub start_tag: Option<SubNode>,
    /// The `</tag>` boundary, absent for void or unclosed elements.
    pub end_tag: Option<SubNode>,
    pub attrs: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    /// Decoded text value.
    pub value: String,
    pub line_nodes: Vec<SubNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentData {
    /// Comment text without delimiters.
    pub value: String,
    /// `<!--`
    pub start_tag: SubNode,
    /// `-->`
    pub end_tag: SubNode,
    /// Everything between the delimiters.
    pub content: SubNode,
    pub line_nodes: Vec<SubNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTypeData {
    pub name: String,
}

/// A located sub-node of a tree node: a tag boundary, comment content or a
/// single line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubNode {
    pub node_type: NodeType,
    pub location: NodeLocation,
    /// Source text of the sub-node, set for lines and comment content.
    pub value: Option<String>,
}

/// An attribute of an element's start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// `None` when the constructor reported no location for this name.
    pub location: Option<NodeLocation>,
}

impl Node {
    /// Creates a node without children.
    #[inline]
    pub fn new(data: NodeData, location: Option<NodeLocation>) -> Self {
        Self {
            data,
            location,
            children: Vec::new(),
        }
    }

    /// Creates an unlocated program root.
    #[inline]
    pub fn program() -> Self {
        Self::new(NodeData::Program, None)
    }

    /// Creates a null placeholder.
    #[inline]
    pub fn null() -> Self {
        Self::new(NodeData::Null, None)
    }

    /// Returns the type of this node.
    pub fn node_type(&self) -> NodeType {
        match &self.data {
            NodeData::Program => NodeType::Program,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::DocumentType(_) => NodeType::DocumentType,
            NodeData::Null => NodeType::Null,
        }
    }

    /// Returns true if this node is a null placeholder.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.data, NodeData::Null)
    }

    /// Returns the byte range of this node, if it has a location.
    #[inline]
    pub fn range(&self) -> Option<Span> {
        self.location.map(|location| location.range)
    }

    /// Returns the tag name for element nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element(element) => Some(&element.tag_name),
            _ => None,
        }
    }

    /// Returns the opening boundary of an element or comment.
    pub fn start_tag(&self) -> Option<&SubNode> {
        match &self.data {
            NodeData::Element(element) => element.start_tag.as_ref(),
            NodeData::Comment(comment) => Some(&comment.start_tag),
            _ => None,
        }
    }

    /// Returns the closing boundary of an element or comment.
    pub fn end_tag(&self) -> Option<&SubNode> {
        match &self.data {
            NodeData::Element(element) => element.end_tag.as_ref(),
            NodeData::Comment(comment) => Some(&comment.end_tag),
            _ => None,
        }
    }

    /// Returns `[startTag.start, endTag.end]` when both boundaries exist.
    pub fn tag_span(&self) -> Option<Span> {
        let start = self.start_tag()?;
        let end = self.end_tag()?;
        Some(Span::new(start.location.range.start, end.location.range.end))
    }

    /// Returns the observed location, or derives one from the first and last
    /// children, recursively. A childless node without a location resolves
    /// to a zero-width location at the origin.
    pub fn resolved_location(&self) -> NodeLocation {
        if let Some(location) = self.location {
            return location;
        }
        match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => first
                .resolved_location()
                .to(&last.resolved_location()),
            _ => NodeLocation::origin(),
        }
    }

    /// Shifts every location in this subtree by `index` bytes and `lines`
    /// lines.
    pub fn shift(&mut self, index: u32, lines: u32) {
        if let Some(location) = self.location.as_mut() {
            *location = location.shift(index, lines);
        }
        match &mut self.data {
            NodeData::Element(element) => {
                let element = &mut **element;
                for tag in [&mut element.start_tag, &mut element.end_tag]
                    .into_iter()
                    .flatten()
                {
                    tag.shift(index, lines);
                }
                for attr in &mut element.attrs {
                    if let Some(location) = attr.location.as_mut() {
                        *location = location.shift(index, lines);
                    }
                }
            }
            NodeData::Text(text) => {
                for line in &mut text.line_nodes {
                    line.shift(index, lines);
                }
            }
            NodeData::Comment(comment) => {
                comment.start_tag.shift(index, lines);
                comment.end_tag.shift(index, lines);
                comment.content.shift(index, lines);
                for line in &mut comment.line_nodes {
                    line.shift(index, lines);
                }
            }
            NodeData::Program | NodeData::DocumentType(_) | NodeData::Null => {}
        }
        for child in &mut self.children {
            child.shift(index, lines);
        }
    }
}

impl TextData {
    /// Creates text data without line nodes.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            line_nodes: Vec::new(),
        }
    }
}

impl SubNode {
    /// Creates a sub-node without a value.
    #[inline]
    pub fn new(node_type: NodeType, location: NodeLocation) -> Self {
        Self {
            node_type,
            location,
            value: None,
        }
    }

    /// Creates a sub-node carrying its source text.
    #[inline]
    pub fn with_value(node_type: NodeType, location: NodeLocation, value: impl Into<String>) -> Self {
        Self {
            node_type,
            location,
            value: Some(value.into()),
        }
    }

    #[inline]
    fn shift(&mut self, index: u32, lines: u32) {
        self.location = self.location.shift(index, lines);
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let node_type = self.node_type();

        let mut len = 1; // type
        if self.location.is_some() {
            len += 2;
        }
        if node_type.is_parent() {
            len += 1;
        }
        len += self.data.present_field_count();

        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("type", &node_type)?;
        if let Some(location) = &self.location {
            state.serialize_field("range", &location.range)?;
            state.serialize_field("loc", &location.loc)?;
        }
        self.data.serialize_fields(&mut state)?;
        if node_type.is_parent() {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

impl NodeData {
    /// Returns the number of kind-specific fields for serialization.
    fn present_field_count(&self) -> usize {
        match self {
            NodeData::Program | NodeData::Null => 0,
            NodeData::Element(element) => 3 + usize::from(element.end_tag.is_some()),
            NodeData::Text(_) => 2,
            NodeData::Comment(_) => 5,
            NodeData::DocumentType(_) => 1,
        }
    }

    /// Serializes kind-specific fields into the given struct serializer state.
    fn serialize_fields<S: SerializeStruct>(&self, state: &mut S) -> Result<(), S::Error> {
        match self {
            NodeData::Program | NodeData::Null => {}
            NodeData::Element(element) => {
                state.serialize_field("tagName", &element.tag_name)?;
                state.serialize_field("startTag", &element.start_tag)?;
                if let Some(end_tag) = &element.end_tag {
                    state.serialize_field("endTag", end_tag)?;
                }
                state.serialize_field("attrs", &element.attrs)?;
            }
            NodeData::Text(text) => {
                state.serialize_field("value", &text.value)?;
                state.serialize_field("lineNodes", &text.line_nodes)?;
            }
            NodeData::Comment(comment) => {
                state.serialize_field("value", &comment.value)?;
                state.serialize_field("startTag", &comment.start_tag)?;
                state.serialize_field("endTag", &comment.end_tag)?;
                state.serialize_field("content", &comment.content)?;
                state.serialize_field("lineNodes", &comment.line_nodes)?;
            }
            NodeData::DocumentType(doctype) => {
                state.serialize_field("name", &doctype.name)?;
            }
        }
        Ok(())
    }
}

impl Serialize for SubNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let len = 3 + usize::from(self.value.is_some());
        let mut state = serializer.serialize_struct("SubNode", len)?;
        state.serialize_field("type", &self.node_type)?;
        if let Some(value) = &self.value {
            state.serialize_field("value", value)?;
        }
        state.serialize_field("range", &self.location.range)?;
        state.serialize_field("loc", &self.location.loc)?;
        state.end()
    }
}

impl Serialize for Attribute {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let len = 3 + if self.location.is_some() { 2 } else { 0 };
        let mut state = serializer.serialize_struct("Attribute", len)?;
        state.serialize_field("type", &NodeType::Attribute)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.value)?;
        if let Some(location) = &self.location {
            state.serialize_field("range", &location.range)?;
            state.serialize_field("loc", &location.loc)?;
        }
        state.end()
    }
}
