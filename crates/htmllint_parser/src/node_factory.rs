//! Conversion of a single raw node into an AST node.

use htmllint_ast::{
    Attribute, CommentData, DocumentTypeData, ElementData, Location, Node, NodeData,
    NodeLocation, NodeType, Position, Span, SubNode, TextData,
};

use crate::raw::{RawLocation, RawNode};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Builds normalized nodes from raw nodes.
///
/// Ranges of synthesized sub-nodes are computed against `source`, the text
/// the constructor was given.
#[derive(Debug, Clone, Copy)]
pub struct NodeFactory<'s> {
    source: &'s str,
}

impl<'s> NodeFactory<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// Creates the node for `raw`, without children.
    ///
    /// Raw nodes without a usable location become null placeholders, except
    /// for the document root whose location is resolved from its children
    /// once the tree is complete.
    pub fn create(&self, raw: &RawNode, is_root: bool) -> Node {
        let node_type = NodeType::from_raw_kind(&raw.node_name);

        if node_type == NodeType::Program && is_root {
            let location = raw.location.as_ref().map(|raw| raw.span.to_location());
            return Node::new(NodeData::Program, location);
        }

        let Some(raw_location) = &raw.location else {
            return Node::null();
        };
        let location = raw_location.span.to_location();

        match node_type {
            NodeType::Element => self.element(raw, raw_location, location),
            NodeType::Text => self.text(raw, location),
            NodeType::Comment => self.comment(raw, location),
            NodeType::DocumentType => Node::new(
                NodeData::DocumentType(DocumentTypeData {
                    name: raw.value.clone().unwrap_or_default(),
                }),
                Some(location),
            ),
            _ => Node::null(),
        }
    }

    fn element(&self, raw: &RawNode, raw_location: &RawLocation, location: NodeLocation) -> Node {
        let attrs = raw
            .attrs
            .iter()
            .map(|attr| Attribute {
                name: attr.name.clone(),
                value: attr.value.clone(),
                location: raw_location
                    .attrs
                    .get(&attr.name)
                    .map(|span| span.to_location()),
            })
            .collect();

        let data = ElementData {
            tag_name: raw.node_name.clone(),
            start_tag: raw_location
                .start_tag
                .map(|span| SubNode::new(NodeType::StartTag, span.to_location())),
            end_tag: raw_location
                .end_tag
                .map(|span| SubNode::new(NodeType::EndTag, span.to_location())),
            attrs,
        };
        Node::new(NodeData::Element(Box::new(data)), Some(location))
    }

    fn text(&self, raw: &RawNode, location: NodeLocation) -> Node {
        let line_nodes = match self.source.get(location.range.as_range()) {
            Some(text) => split_lines(text, location.range.start, location.loc.start),
            None => Vec::new(),
        };
        let data = TextData {
            value: raw.value.clone().unwrap_or_default(),
            line_nodes,
        };
        Node::new(NodeData::Text(data), Some(location))
    }

    fn comment(&self, raw: &RawNode, location: NodeLocation) -> Node {
        let range = location.range;
        let slice = self.source.get(range.as_range()).unwrap_or_default();

        let open_end = (range.start + COMMENT_OPEN.len() as u32).min(range.end);
        let close_start = if slice.ends_with(COMMENT_CLOSE) {
            range.end.saturating_sub(COMMENT_CLOSE.len() as u32).max(open_end)
        } else {
            // Unterminated at end of input: no closing delimiter in the text.
            range.end
        };

        let open_end_pos = Position::new(
            location.loc.start.line,
            location.loc.start.column + (open_end - range.start),
        );
        let close_start_pos = Position::new(
            location.loc.end.line,
            location.loc.end.column.saturating_sub(range.end - close_start),
        );

        let start_tag = SubNode::new(
            NodeType::StartTag,
            NodeLocation::new(
                Span::new(range.start, open_end),
                Location::new(location.loc.start, open_end_pos),
            ),
        );
        let end_tag = SubNode::new(
            NodeType::EndTag,
            NodeLocation::new(
                Span::new(close_start, range.end),
                Location::new(close_start_pos, location.loc.end),
            ),
        );

        let content_text = self
            .source
            .get(open_end as usize..close_start as usize)
            .unwrap_or_default();
        let content = SubNode::with_value(
            NodeType::CommentContent,
            NodeLocation::new(
                Span::new(open_end, close_start),
                Location::new(open_end_pos, close_start_pos),
            ),
            content_text,
        );
        let line_nodes = split_lines(content_text, open_end, open_end_pos);

        let data = CommentData {
            value: raw.value.clone().unwrap_or_default(),
            start_tag,
            end_tag,
            content,
            line_nodes,
        };
        Node::new(NodeData::Comment(Box::new(data)), Some(location))
    }
}

/// Splits `text`, which starts at `offset`/`start` in the source, into one
/// line node per physical line. Leading whitespace of each line is excluded
/// from that line's node.
pub fn split_lines(text: &str, offset: u32, start: Position) -> Vec<SubNode> {
    let mut nodes = Vec::new();
    let mut offset = offset;
    let mut line = start.line;
    let mut column = start.column;

    for raw_line in text.split('\n') {
        let content = raw_line.trim_start();
        let indent = saturating_offset(raw_line.len() - content.len());
        let length = saturating_offset(content.len());

        let line_start = offset.saturating_add(indent);
        let start_column = column.saturating_add(indent);
        let location = NodeLocation::new(
            Span::new(line_start, line_start.saturating_add(length)),
            Location::new(
                Position::new(line, start_column),
                Position::new(line, start_column.saturating_add(length)),
            ),
        );
        nodes.push(SubNode::with_value(NodeType::Line, location, content));

        offset = offset.saturating_add(indent).saturating_add(length).saturating_add(1);
        line += 1;
        column = 0;
    }

    nodes
}

fn saturating_offset(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
