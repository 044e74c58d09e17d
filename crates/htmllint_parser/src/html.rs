//! HTML parser pipeline.
//!
//! Front matter stripping, template scanning, tree construction, conversion
//! and adjustment, in that order. All positions in the result refer to the
//! text passed to [`HtmlParser::parse_document`].

use htmllint_ast::{Node, NodeLocation, NodeType, Program, VisitorKeys};
use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::debug;

use crate::adjuster::adjust;
use crate::error::source_offset;
use crate::raw::{ConstructOptions, TreeConstructor};
use crate::skip_ranges::raw_content_ranges;
use crate::tree_builder::build_tree;
use crate::{
    LocationOffset, ParseError, Parser, ParserOptions, TemplateSyntaxSpan, parse_template_syntax,
    strip_frontmatter,
};

/// File extensions handled by [`HtmlParser`].
pub const EXTENSIONS: &[&str] = &["html", "htm", "hbs", "njk", "ejs", "erb", "liquid"];

/// The output of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub ast: Program,
    /// Template expressions in document order.
    pub templates: Vec<TemplateSyntaxSpan>,
    pub visitor_keys: &'static VisitorKeys,
}

impl Serialize for ParseResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ParseResult", 4)?;
        state.serialize_field("ast", &self.ast)?;
        state.serialize_field("templates", &self.templates)?;
        state.serialize_field("visitorKeys", self.visitor_keys)?;
        state.serialize_field("scopeManager", &None::<()>)?;
        state.end()
    }
}

/// HTML parser built on an external tree constructor.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser<C> {
    constructor: C,
    options: ParserOptions,
}

impl<C: TreeConstructor> HtmlParser<C> {
    /// Creates a parser with default options.
    pub fn new(constructor: C) -> Self {
        Self::with_options(constructor, ParserOptions::default())
    }

    pub fn with_options(constructor: C, options: ParserOptions) -> Self {
        Self {
            constructor,
            options,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses `source` into a [`ParseResult`].
    ///
    /// # Errors
    ///
    /// Fails on nested or unterminated template expressions, when the tree
    /// constructor rejects the text, or when the text is 4 GiB or larger.
    /// No partial result is returned.
    pub fn parse_document(&self, source: &str) -> Result<ParseResult, ParseError> {
        source_offset(source.len())?;
        let (body, offset) = self.split_frontmatter(source);

        let syntax = self.options.template_syntax();
        let skip_ranges = raw_content_ranges(body, &self.options.raw_content_tags);
        let mut templates = parse_template_syntax(body, &syntax, &skip_ranges)
            .map_err(|err| offset.apply_to_error(err))?;

        let construct_options = ConstructOptions {
            templates: &templates,
            raw_content_tags: &self.options.raw_content_tags,
        };
        let raw = self
            .constructor
            .construct(body, &construct_options)
            .map_err(|err| offset.apply_to_error(err))?;

        let mut root = build_tree(body, &raw);
        if root.node_type() != NodeType::Program {
            debug!("Wrapping `{}` root in a program node", root.node_type());
            let mut program = Node::program();
            program.children.push(root);
            root = program;
        }
        adjust(&mut root);
        if root.location.is_none() && root.children.is_empty() {
            root.location = Some(NodeLocation::origin());
        }

        offset.apply_to_node(&mut root);
        offset.apply_to_templates(&mut templates);

        Ok(ParseResult {
            ast: Program::from_root(root, source),
            templates,
            visitor_keys: VisitorKeys::get(),
        })
    }

    fn split_frontmatter<'s>(&self, source: &'s str) -> (&'s str, LocationOffset) {
        if !self.options.frontmatter {
            return (source, LocationOffset::NONE);
        }
        match strip_frontmatter(source) {
            Some(frontmatter) => {
                debug!(
                    "Stripped front matter ({} bytes, {} lines)",
                    frontmatter.index,
                    frontmatter.lines()
                );
                (frontmatter.html, LocationOffset::from(&frontmatter))
            }
            None => (source, LocationOffset::NONE),
        }
    }
}

impl<C: TreeConstructor> Parser for HtmlParser<C> {
    fn name(&self) -> &str {
        "html"
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        self.parse_document(source)
    }
}
