//! Span and position types for source locations.
//!
//! Ranges are byte offsets into the original document text, positions use
//! 1-indexed lines and 0-indexed columns, matching the conventions of
//! JavaScript linting engines.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// The first position of any document.
    pub const ORIGIN: Position = Position::new(1, 0);

    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns this position moved down by `lines` lines.
    #[inline]
    pub const fn shift_lines(self, lines: u32) -> Self {
        Self::new(self.line + lines, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A half-open byte range `[start, end)` in source text.
///
/// Serialized as a two-element array, the `range` shape consumers expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Start byte offset (0-indexed, inclusive).
    pub start: u32,
    /// End byte offset (0-indexed, exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this span contains the given offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if `other` lies within `[self.start, self.end]`.
    #[inline]
    pub const fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merges two spans into one that covers both.
    #[inline]
    pub const fn merge(&self, other: &Span) -> Span {
        Span {
            start: if self.start < other.start {
                self.start
            } else {
                other.start
            },
            end: if self.end > other.end {
                self.end
            } else {
                other.end
            },
        }
    }

    /// Returns this span moved forward by `delta` bytes.
    #[inline]
    pub const fn shift(self, delta: u32) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Returns the span as a `usize` range for slicing.
    #[inline]
    pub const fn as_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl Serialize for Span {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.start, self.end].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Span {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let [start, end] = <[u32; 2]>::deserialize(deserializer)?;
        Ok(Span::new(start, end))
    }
}

/// Location information combining start and end positions.
///
/// This is used for serialization to match the `loc` format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Start position.
    pub start: Position,
    /// End position.
    pub end: Position,
}

impl Location {
    /// Creates a new location.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns this location moved down by `lines` lines.
    #[inline]
    pub const fn shift_lines(self, lines: u32) -> Self {
        Self::new(self.start.shift_lines(lines), self.end.shift_lines(lines))
    }
}

/// The full source location of a node: byte range plus line/column location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeLocation {
    pub range: Span,
    pub loc: Location,
}

impl NodeLocation {
    /// Creates a new node location.
    #[inline]
    pub const fn new(range: Span, loc: Location) -> Self {
        Self { range, loc }
    }

    /// A zero-width location at the start of the document.
    pub const fn origin() -> Self {
        Self::new(
            Span::new(0, 0),
            Location::new(Position::ORIGIN, Position::ORIGIN),
        )
    }

    /// Returns the location running from the start of `self` to the end of
    /// `last`.
    #[inline]
    pub const fn to(&self, last: &NodeLocation) -> Self {
        Self::new(
            Span::new(self.range.start, last.range.end),
            Location::new(self.loc.start, last.loc.end),
        )
    }

    /// Returns this location shifted by `index` bytes and `lines` lines.
    #[inline]
    pub const fn shift(self, index: u32, lines: u32) -> Self {
        Self::new(self.range.shift(index), self.loc.shift_lines(lines))
    }
}
