//! The finished tree handed to analysis engines.

use std::ops::ControlFlow;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::visitor::{VisitResult, Visitor, walk_children, walk_node};
use crate::{Node, NodeData, NodeLocation, NodeType, SubNode};

/// A flat token: one syntactic unit of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Source text covered by the token.
    pub value: String,
    #[serde(flatten)]
    pub location: NodeLocation,
}

/// The root of a parsed document.
///
/// `body` holds the top-level nodes, `tokens` the flat document-order list of
/// start tags, attributes, end tags, doctypes and text nodes, and `comments`
/// the content of every comment. Comment delimiters are never tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Node>,
    pub tokens: Vec<Token>,
    pub comments: Vec<SubNode>,
    pub location: NodeLocation,
}

impl Program {
    /// Builds a program from a converted root node.
    ///
    /// `source` is the text the root's ranges refer to; token values are
    /// sliced from it.
    pub fn from_root(root: Node, source: &str) -> Self {
        let location = root.resolved_location();

        let mut collector = TokenCollector {
            source,
            tokens: Vec::new(),
            comments: Vec::new(),
        };
        let _ = walk_node(&mut collector, &root);
        let TokenCollector {
            mut tokens,
            mut comments,
            ..
        } = collector;
        tokens.sort_by_key(|token| token.location.range.start);
        comments.sort_by_key(|comment| comment.location.range.start);

        Self {
            body: root.children,
            tokens,
            comments,
            location,
        }
    }
}

impl Serialize for Program {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Program", 6)?;
        state.serialize_field("type", &NodeType::Program)?;
        state.serialize_field("body", &self.body)?;
        state.serialize_field("tokens", &self.tokens)?;
        state.serialize_field("comments", &self.comments)?;
        state.serialize_field("range", &self.location.range)?;
        state.serialize_field("loc", &self.location.loc)?;
        state.end()
    }
}

struct TokenCollector<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    comments: Vec<SubNode>,
}

impl TokenCollector<'_> {
    fn push(&mut self, node_type: NodeType, location: NodeLocation) {
        let value = self
            .source
            .get(location.range.as_range())
            .unwrap_or_default()
            .to_string();
        self.tokens.push(Token {
            node_type,
            value,
            location,
        });
    }
}

impl<'a> Visitor<'a> for TokenCollector<'_> {
    fn visit_element(&mut self, node: &'a Node) -> VisitResult {
        if let NodeData::Element(element) = &node.data {
            if let Some(start_tag) = &element.start_tag {
                self.push(NodeType::StartTag, start_tag.location);
            }
            for attr in &element.attrs {
                if let Some(location) = attr.location {
                    self.push(NodeType::Attribute, location);
                }
            }
            if let Some(end_tag) = &element.end_tag {
                self.push(NodeType::EndTag, end_tag.location);
            }
        }
        walk_children(self, node)
    }

    fn visit_text(&mut self, node: &'a Node) -> VisitResult {
        if let Some(location) = node.location {
            self.push(NodeType::Text, location);
        }
        ControlFlow::Continue(())
    }

    fn visit_document_type(&mut self, node: &'a Node) -> VisitResult {
        if let Some(location) = node.location {
            self.push(NodeType::DocumentType, location);
        }
        ControlFlow::Continue(())
    }

    fn visit_comment(&mut self, node: &'a Node) -> VisitResult {
        if let NodeData::Comment(comment) = &node.data {
            self.comments.push(comment.content.clone());
        }
        ControlFlow::Continue(())
    }
}
