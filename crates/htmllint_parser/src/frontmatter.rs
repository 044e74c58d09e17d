//! Front matter detection.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\r?\n$").expect("Failed to compile opening fence regex"));

static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*$").expect("Failed to compile closing fence regex"));

// Any line starting with dashes ends the block, well-formed or not.
static FENCE_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---").expect("Failed to compile fence regex"));

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("Failed to compile blank line regex"));

/// A leading metadata block stripped from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frontmatter<'a> {
    /// Byte offset of the first byte after the closing fence and its line
    /// break.
    pub index: usize,
    /// 1-based line number at which `html` starts.
    pub line: usize,
    /// The remaining document.
    pub html: &'a str,
}

impl Frontmatter<'_> {
    /// Number of lines removed from the top of the document.
    pub fn lines(&self) -> usize {
        self.line - 1
    }
}

/// Detects a `---` fenced block at the start of `text`.
///
/// Blank lines may precede the opening fence, which must be exactly `---`.
/// The first later line starting with `---` closes the block when nothing
/// but whitespace follows the dashes; otherwise the block is malformed.
/// Returns `None` when there is no well-formed block.
pub fn strip_frontmatter(text: &str) -> Option<Frontmatter<'_>> {
    let mut index = 0;
    let mut newlines = 0;
    let mut lines = text.split_inclusive('\n');

    let opening = lines.by_ref().find(|line| {
        index += line.len();
        newlines += usize::from(line.ends_with('\n'));
        !BLANK_LINE.is_match(line)
    })?;
    if !OPENING_FENCE.is_match(opening) {
        return None;
    }

    for line in lines {
        index += line.len();
        newlines += usize::from(line.ends_with('\n'));

        if FENCE_LIKE.is_match(line) {
            return CLOSING_FENCE.is_match(line).then(|| Frontmatter {
                index,
                line: newlines + 1,
                html: &text[index..],
            });
        }
    }

    None
}
