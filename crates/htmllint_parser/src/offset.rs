//! Mapping of body coordinates back to the original text.

use htmllint_ast::Node;

use crate::{Frontmatter, ParseError, TemplateSyntaxSpan};

/// Distance between the start of the original text and the start of the
/// parsed body.
///
/// Columns need no adjustment because a stripped body always begins at a
/// line start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationOffset {
    /// Bytes removed before the body.
    pub index: u32,
    /// Lines removed before the body.
    pub lines: u32,
}

impl LocationOffset {
    pub const NONE: LocationOffset = LocationOffset { index: 0, lines: 0 };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Shifts every location in the tree.
    pub fn apply_to_node(&self, node: &mut Node) {
        if !self.is_none() {
            node.shift(self.index, self.lines);
        }
    }

    pub fn apply_to_templates(&self, templates: &mut [TemplateSyntaxSpan]) {
        for template in templates {
            *template = template.shifted(self.index);
        }
    }

    pub fn apply_to_error(&self, error: ParseError) -> ParseError {
        error.shifted(self.index)
    }
}

impl From<&Frontmatter<'_>> for LocationOffset {
    fn from(frontmatter: &Frontmatter<'_>) -> Self {
        Self {
            index: frontmatter.index as u32,
            lines: frontmatter.lines() as u32,
        }
    }
}
