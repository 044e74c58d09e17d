//! # htmllint_parser
//!
//! Conversion of HTML documents into the htmllint AST.
//!
//! This crate provides:
//! - The raw tree interface a standards-compliant tree constructor plugs into
//! - Conversion of the raw tree into a location-exact AST, and repair of
//!   nodes attached outside their parent's tags
//! - A template delimiter scanner for `{{ }}`, `<% %>`, `{% %}` style
//!   expressions
//! - Front matter stripping with positions mapped back to the original text
//!
//! ## Example
//!
//! ```rust,ignore
//! use htmllint_parser::{HtmlParser, Parser, ParserOptions};
//!
//! let parser = HtmlParser::with_options(MyTreeConstructor, ParserOptions::default());
//! let result = parser.parse("<p>Hello</p>").unwrap();
//! assert_eq!(result.ast.body.len(), 1);
//! ```

mod adjuster;
mod error;
mod frontmatter;
mod html;
mod node_factory;
mod offset;
mod options;
pub mod raw;
mod skip_ranges;
mod template;
mod traits;
mod tree_builder;

pub use adjuster::adjust;
pub use error::ParseError;
pub use frontmatter::{Frontmatter, strip_frontmatter};
pub use html::{EXTENSIONS, HtmlParser, ParseResult};
pub use node_factory::{NodeFactory, split_lines};
pub use offset::LocationOffset;
pub use options::ParserOptions;
pub use raw::{ConstructOptions, RawNode, TreeConstructor};
pub use skip_ranges::raw_content_ranges;
pub use template::{
    SyntaxKind, SyntaxPair, SyntaxToken, TemplateSyntax, TemplateSyntaxSpan,
    parse_template_syntax, tokenize,
};
pub use traits::Parser;
pub use tree_builder::build_tree;
