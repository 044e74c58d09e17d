//! Template delimiter scanning.
//!
//! Locates `{{ }}`, `<% %>`, `{% %}` style regions in a document with a
//! single-slot matching automaton. Template expressions cannot nest.

use std::collections::BTreeMap;

use htmllint_ast::Span;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ParseError;
use crate::error::source_offset;

/// A configured open/close marker pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxPair {
    pub open: String,
    pub close: String,
    /// Whether the pair delimits a template comment.
    #[serde(default)]
    pub is_comment: bool,
}

impl SyntaxPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            is_comment: false,
        }
    }

    pub fn comment(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            is_comment: true,
            ..Self::new(open, close)
        }
    }
}

/// The set of marker pairs to scan for, ordered longest open marker first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSyntax {
    pairs: Vec<SyntaxPair>,
}

impl TemplateSyntax {
    /// Creates a syntax from marker pairs.
    ///
    /// Pairs with an empty marker are dropped. When two pairs share an open
    /// marker the later one wins.
    pub fn new(pairs: impl IntoIterator<Item = SyntaxPair>) -> Self {
        let mut by_open: BTreeMap<String, SyntaxPair> = BTreeMap::new();
        for pair in pairs {
            if pair.open.is_empty() || pair.close.is_empty() {
                debug!("Ignoring template syntax pair with an empty marker");
                continue;
            }
            by_open.insert(pair.open.clone(), pair);
        }

        let mut pairs: Vec<SyntaxPair> = by_open.into_values().collect();
        pairs.sort_by(|a, b| b.open.len().cmp(&a.open.len()).then_with(|| a.open.cmp(&b.open)));
        Self { pairs }
    }

    /// Builds a syntax from open → close maps. Comment pairs override
    /// expression pairs with the same open marker.
    pub fn from_maps(
        expressions: &BTreeMap<String, String>,
        comments: &BTreeMap<String, String>,
    ) -> Self {
        let expressions = expressions
            .iter()
            .map(|(open, close)| SyntaxPair::new(open.as_str(), close.as_str()));
        let comments = comments
            .iter()
            .map(|(open, close)| SyntaxPair::comment(open.as_str(), close.as_str()));
        Self::new(expressions.chain(comments))
    }

    /// Returns the pairs, longest open marker first.
    pub fn pairs(&self) -> &[SyntaxPair] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn pair_for(&self, open: &str) -> Option<&SyntaxPair> {
        self.pairs.iter().find(|pair| pair.open == open)
    }

    /// Distinct markers of one kind, longest first.
    fn markers(&self, kind: SyntaxKind) -> Vec<&str> {
        let mut markers: Vec<&str> = self
            .pairs
            .iter()
            .map(|pair| match kind {
                SyntaxKind::Open => pair.open.as_str(),
                SyntaxKind::Close => pair.close.as_str(),
            })
            .collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        markers.dedup();
        markers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxKind {
    Open,
    Close,
}

/// One occurrence of an open or close marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxToken {
    #[serde(rename = "type")]
    pub kind: SyntaxKind,
    pub value: String,
    pub range: Span,
    pub is_comment: bool,
}

/// A matched template expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSyntaxSpan {
    /// Range of the open marker.
    pub open: Span,
    /// Range of the close marker.
    pub close: Span,
    pub is_comment: bool,
}

impl TemplateSyntaxSpan {
    /// Returns the range from the start of the open marker to the end of the
    /// close marker.
    pub fn range(&self) -> Span {
        Span::new(self.open.start, self.close.end)
    }

    pub(crate) fn shifted(self, delta: u32) -> Self {
        Self {
            open: self.open.shift(delta),
            close: self.close.shift(delta),
            is_comment: self.is_comment,
        }
    }
}

/// Finds every marker occurrence in `text`, sorted by position.
///
/// Occurrences starting inside a skip range are ignored, as are occurrences
/// of a marker inside an occurrence of a longer marker of the same kind.
///
/// # Errors
///
/// Returns [`ParseError::InvalidSource`] when `text` is too long for span
/// offsets.
pub fn tokenize(
    text: &str,
    syntax: &TemplateSyntax,
    skip_ranges: &[Span],
) -> Result<Vec<SyntaxToken>, ParseError> {
    source_offset(text.len())?;
    let skip_ranges = normalize(skip_ranges);
    let mut tokens = Vec::new();

    for kind in [SyntaxKind::Open, SyntaxKind::Close] {
        let mut blocked = skip_ranges.clone();
        for marker in syntax.markers(kind) {
            let found = find_all(text, marker, &blocked)?;
            if !found.is_empty() {
                blocked.extend(&found);
                blocked = normalize(&blocked);
            }

            let is_comment = syntax.pairs.iter().any(|pair| {
                pair.is_comment
                    && match kind {
                        SyntaxKind::Open => pair.open == marker,
                        SyntaxKind::Close => pair.close == marker,
                    }
            });
            tokens.extend(found.into_iter().map(|range| SyntaxToken {
                kind,
                value: marker.to_string(),
                range,
                is_comment,
            }));
        }
    }

    // Close before open at the same position; see `parse_template_syntax`.
    tokens.sort_by_key(|token| (token.range.start, token.kind == SyntaxKind::Open));
    Ok(tokens)
}

/// Matches template markers in `text` and returns the expression spans in
/// document order.
///
/// # Errors
///
/// Returns [`ParseError::NestedTemplateSyntax`] when an open marker appears
/// while another expression is pending, and
/// [`ParseError::UnterminatedTemplateSyntax`] when one is still pending at
/// the end of the text. Text too long for span offsets is
/// [`ParseError::InvalidSource`].
pub fn parse_template_syntax(
    text: &str,
    syntax: &TemplateSyntax,
    skip_ranges: &[Span],
) -> Result<Vec<TemplateSyntaxSpan>, ParseError> {
    if text.is_empty() || syntax.is_empty() {
        return Ok(Vec::new());
    }

    let mut spans = Vec::new();
    let mut pending: Option<SyntaxToken> = None;
    let mut tokens = tokenize(text, syntax, skip_ranges)?.into_iter().peekable();

    while let Some(mut token) = tokens.next() {
        // A marker used both to open and to close acts as whichever fits.
        if tokens.peek().is_some_and(|next| next.range == token.range) {
            let Some(open) = tokens.next() else { break };
            if pending.is_none() {
                token = open;
            }
        }

        match token.kind {
            SyntaxKind::Open => {
                if let Some(open) = &pending {
                    let expected = expected_close(syntax, open);
                    return Err(ParseError::nested(token.value, expected, token.range));
                }
                pending = Some(token);
            }
            SyntaxKind::Close => match pending.take() {
                None => trace!(marker = %token.value, offset = token.range.start, "Ignoring stray close marker"),
                Some(open) => match syntax.pair_for(&open.value) {
                    Some(pair) if pair.close == token.value => spans.push(TemplateSyntaxSpan {
                        open: open.range,
                        close: token.range,
                        is_comment: pair.is_comment,
                    }),
                    _ => trace!(
                        open = %open.value,
                        close = %token.value,
                        offset = token.range.start,
                        "Dropping template expression closed by a mismatched marker"
                    ),
                },
            },
        }
    }

    if let Some(open) = pending {
        let expected = expected_close(syntax, &open);
        return Err(ParseError::unterminated(open.value, expected, open.range));
    }

    debug!("Found {} template expressions", spans.len());
    Ok(spans)
}

fn expected_close(syntax: &TemplateSyntax, open: &SyntaxToken) -> String {
    syntax
        .pair_for(&open.value)
        .map(|pair| pair.close.clone())
        .unwrap_or_default()
}

/// Finds non-overlapping occurrences of `marker` that do not start inside
/// a `blocked` range. `blocked` must be sorted and disjoint.
fn find_all(text: &str, marker: &str, blocked: &[Span]) -> Result<Vec<Span>, ParseError> {
    let haystack = text.as_bytes();
    let needle = marker.as_bytes();
    let mut blocked = blocked.iter().peekable();
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(position) = haystack
        .get(from..)
        .and_then(|rest| rest.windows(needle.len()).position(|window| window == needle))
    {
        let start = from + position;
        while blocked
            .next_if(|range| (range.end as usize) <= start)
            .is_some()
        {}
        if let Some(range) = blocked.peek()
            && (range.start as usize) <= start
        {
            from = range.end as usize;
            continue;
        }

        let end = start + needle.len();
        found.push(Span::new(source_offset(start)?, source_offset(end)?));
        from = end;
    }

    Ok(found)
}

/// Sorts skip ranges and merges overlapping ones.
fn normalize(ranges: &[Span]) -> Vec<Span> {
    let mut ranges: Vec<Span> = ranges.iter().copied().filter(|range| !range.is_empty()).collect();
    ranges.sort_by_key(|range| range.start);

    let mut merged: Vec<Span> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => *last = last.merge(&range),
            _ => merged.push(range),
        }
    }
    merged
}
