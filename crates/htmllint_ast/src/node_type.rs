//! Node type definitions.

use serde::{Deserialize, Serialize};

/// Node types of the HTML AST.
///
/// The first group are tree nodes that can appear in `children`; the second
/// group are sub-nodes hanging off a tree node (tag boundaries, attributes
/// and per-line slices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeType {
    /// Root node of a parsed document.
    Program,
    /// An element such as `<div>`.
    Element,
    /// Character data between tags.
    Text,
    /// `<!-- ... -->`.
    Comment,
    /// `<!DOCTYPE ...>`.
    DocumentType,
    /// Placeholder for a raw node without a usable location.
    Null,

    /// Opening tag of an element, or `<!--` of a comment.
    StartTag,
    /// Closing tag of an element, or `-->` of a comment.
    EndTag,
    /// An attribute inside a start tag.
    Attribute,
    /// Text between `<!--` and `-->`.
    CommentContent,
    /// One physical line of a text or comment node, indent excluded.
    Line,
}

impl NodeType {
    /// All node types, in declaration order.
    pub const ALL: [NodeType; 11] = [
        NodeType::Program,
        NodeType::Element,
        NodeType::Text,
        NodeType::Comment,
        NodeType::DocumentType,
        NodeType::Null,
        NodeType::StartTag,
        NodeType::EndTag,
        NodeType::Attribute,
        NodeType::CommentContent,
        NodeType::Line,
    ];

    /// Normalizes a node name emitted by a raw tree constructor.
    ///
    /// Special kinds carry a leading `#` which is stripped before matching;
    /// document kinds become [`NodeType::Program`]. Names without `#` are
    /// element tag names, so an SVG `<text>` stays an element. Unknown special
    /// kinds become [`NodeType::Null`] and are flattened away later.
    pub fn from_raw_kind(kind: &str) -> Self {
        let Some(special) = kind.strip_prefix('#') else {
            return NodeType::Element;
        };
        match special {
            "document" | "document-fragment" => NodeType::Program,
            "text" => NodeType::Text,
            "comment" => NodeType::Comment,
            "documentType" | "doctype" => NodeType::DocumentType,
            _ => NodeType::Null,
        }
    }

    /// Returns the name used for this type in serialized output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeType::Program => "Program",
            NodeType::Element => "Element",
            NodeType::Text => "Text",
            NodeType::Comment => "Comment",
            NodeType::DocumentType => "DocumentType",
            NodeType::Null => "Null",
            NodeType::StartTag => "StartTag",
            NodeType::EndTag => "EndTag",
            NodeType::Attribute => "Attribute",
            NodeType::CommentContent => "CommentContent",
            NodeType::Line => "Line",
        }
    }

    /// Returns true if nodes of this type may have `children`.
    pub const fn is_parent(&self) -> bool {
        matches!(self, NodeType::Program | NodeType::Element | NodeType::Null)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
