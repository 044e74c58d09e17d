//! Tree constructors for integration tests.

#![allow(dead_code)]

use htmllint_parser::raw::{RawAttribute, RawLocation, RawSpan};
use htmllint_parser::{ConstructOptions, ParseError, RawNode, TreeConstructor};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// A minimal tag-soup constructor.
///
/// Handles elements, attributes, text, comments and doctypes. Void elements
/// and `/>` close immediately, an end tag closes the nearest open element of
/// the same name, and elements left open end at their last child. Text is
/// reported undecoded.
pub struct TagSoupConstructor;

/// Returns a fixed raw tree regardless of the text.
pub struct FixedConstructor(pub RawNode);

impl TreeConstructor for FixedConstructor {
    fn construct(
        &self,
        _source: &str,
        _options: &ConstructOptions<'_>,
    ) -> Result<RawNode, ParseError> {
        Ok(self.0.clone())
    }
}

impl TreeConstructor for TagSoupConstructor {
    fn construct(
        &self,
        source: &str,
        _options: &ConstructOptions<'_>,
    ) -> Result<RawNode, ParseError> {
        let mut builder = Builder {
            source,
            stack: Vec::new(),
            children: Vec::new(),
        };

        let bytes = source.as_bytes();
        let mut pos = 0;
        let mut text_start = 0;
        while pos < source.len() {
            let rest = &source[pos..];
            let next_is_alpha = |skip: usize| {
                bytes
                    .get(pos + skip)
                    .is_some_and(|byte| byte.is_ascii_alphabetic())
            };

            let markup = if rest.starts_with("<!--") {
                Some(Markup::Comment)
            } else if rest.starts_with("<!") {
                Some(Markup::Doctype)
            } else if rest.starts_with("</") && next_is_alpha(2) {
                Some(Markup::EndTag)
            } else if rest.starts_with('<') && next_is_alpha(1) {
                Some(Markup::StartTag)
            } else {
                None
            };

            let Some(markup) = markup else {
                pos += rest.chars().next().map_or(1, char::len_utf8);
                continue;
            };

            builder.text(text_start, pos);
            pos = match markup {
                Markup::Comment => builder.comment(pos),
                Markup::Doctype => builder.doctype(pos),
                Markup::EndTag => builder.end_tag(pos),
                Markup::StartTag => builder.start_tag(pos),
            };
            text_start = pos;
        }
        builder.text(text_start, source.len());

        Ok(builder.finish())
    }
}

enum Markup {
    Comment,
    Doctype,
    EndTag,
    StartTag,
}

struct OpenElement {
    node: RawNode,
    start: usize,
    start_tag_end: usize,
}

struct Builder<'s> {
    source: &'s str,
    stack: Vec<OpenElement>,
    children: Vec<RawNode>,
}

impl Builder<'_> {
    fn append(&mut self, node: RawNode) {
        match self.stack.last_mut() {
            Some(open) => open.node.children.push(node),
            None => self.children.push(node),
        }
    }

    fn text(&mut self, start: usize, end: usize) {
        if start < end {
            let node = RawNode::text(
                &self.source[start..end],
                RawLocation::from_offsets(self.source, start, end),
            );
            self.append(node);
        }
    }

    fn comment(&mut self, start: usize) -> usize {
        let body = start + 4;
        let (value_end, end) = match self.source[body..].find("-->") {
            Some(position) => (body + position, body + position + 3),
            None => (self.source.len(), self.source.len()),
        };
        let node = RawNode::comment(
            &self.source[body..value_end],
            RawLocation::from_offsets(self.source, start, end),
        );
        self.append(node);
        end
    }

    fn doctype(&mut self, start: usize) -> usize {
        let end = self.source[start..]
            .find('>')
            .map_or(self.source.len(), |position| start + position + 1);
        let inner_end = if self.source[..end].ends_with('>') {
            end - 1
        } else {
            end
        };
        let name = self.source[start + 2..inner_end]
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_ascii_lowercase();

        self.append(RawNode {
            node_name: "#documentType".to_string(),
            value: Some(name),
            location: Some(RawLocation::from_offsets(self.source, start, end)),
            ..RawNode::default()
        });
        end
    }

    fn start_tag(&mut self, start: usize) -> usize {
        let source = self.source;
        let bytes = source.as_bytes();
        let len = source.len();
        let stops = |byte: u8| byte.is_ascii_whitespace() || byte == b'>' || byte == b'/';

        let mut pos = start + 1;
        while pos < len && !stops(bytes[pos]) {
            pos += 1;
        }
        let name = source[start + 1..pos].to_ascii_lowercase();

        let mut location = RawLocation::default();
        let mut attrs: Vec<RawAttribute> = Vec::new();
        let mut self_closing = false;
        loop {
            while pos < len && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos >= len {
                break;
            }
            if bytes[pos] == b'>' {
                pos += 1;
                break;
            }
            if source[pos..].starts_with("/>") {
                self_closing = true;
                pos += 2;
                break;
            }
            if bytes[pos] == b'/' {
                pos += 1;
                continue;
            }

            let attr_start = pos;
            pos += 1;
            while pos < len && !stops(bytes[pos]) && bytes[pos] != b'=' {
                pos += 1;
            }
            let attr_name = source[attr_start..pos].to_ascii_lowercase();

            let mut value = String::new();
            if bytes.get(pos) == Some(&b'=') {
                pos += 1;
                match bytes.get(pos) {
                    Some(&quote @ (b'"' | b'\'')) => {
                        let close = source[pos + 1..]
                            .find(quote as char)
                            .map_or(len, |position| pos + 1 + position);
                        value = source[pos + 1..close].to_string();
                        pos = (close + 1).min(len);
                    }
                    _ => {
                        let value_start = pos;
                        while pos < len && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>'
                        {
                            pos += 1;
                        }
                        value = source[value_start..pos].to_string();
                    }
                }
            }

            location
                .attrs
                .entry(attr_name.clone())
                .or_insert_with(|| RawSpan::from_offsets(source, attr_start, pos));
            if !attrs.iter().any(|attr| attr.name == attr_name) {
                attrs.push(RawAttribute::new(attr_name, value));
            }
        }

        let end = pos;
        location.span = RawSpan::from_offsets(source, start, end);
        location.start_tag = Some(location.span);

        let node = RawNode::element(name.clone(), attrs, Some(location), Vec::new());
        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            self.append(node);
            return end;
        }

        self.stack.push(OpenElement {
            node,
            start,
            start_tag_end: end,
        });

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let close = source[end..]
                .to_ascii_lowercase()
                .find(&format!("</{name}"))
                .map_or(len, |position| end + position);
            self.text(end, close);
            return close;
        }
        end
    }

    fn end_tag(&mut self, start: usize) -> usize {
        let end = self.source[start..]
            .find('>')
            .map_or(self.source.len(), |position| start + position + 1);
        let name = self.source[start + 2..]
            .split(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let Some(index) = self
            .stack
            .iter()
            .rposition(|open| open.node.node_name == name)
        else {
            return end;
        };
        while self.stack.len() > index + 1 {
            self.close_implicitly();
        }
        if let Some(open) = self.stack.pop() {
            let mut node = open.node;
            if let Some(location) = node.location.as_mut() {
                location.span = RawSpan::from_offsets(self.source, open.start, end);
                location.end_tag = Some(RawSpan::from_offsets(self.source, start, end));
            }
            self.append(node);
        }
        end
    }

    fn close_implicitly(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        let mut node = open.node;
        let end = node
            .children
            .last()
            .and_then(|child| child.location.as_ref())
            .map_or(open.start_tag_end, |location| location.span.end_offset);
        if let Some(location) = node.location.as_mut() {
            location.span = RawSpan::from_offsets(self.source, open.start, end);
        }
        self.append(node);
    }

    fn finish(mut self) -> RawNode {
        while !self.stack.is_empty() {
            self.close_implicitly();
        }
        RawNode::document(self.children)
    }
}
