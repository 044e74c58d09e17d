//! Parser trait definition.

use crate::{ParseError, ParseResult};

/// Trait for parsing source text into a [`ParseResult`].
///
/// # Example
///
/// ```rust,ignore
/// use htmllint_parser::{ParseError, ParseResult, Parser};
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["xhtml"]
///     }
///
///     fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading
    /// dot.
    fn extensions(&self) -> &[&str];

    /// Parses the source text.
    ///
    /// All reported positions refer to `source` as given.
    fn parse(&self, source: &str) -> Result<ParseResult, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
