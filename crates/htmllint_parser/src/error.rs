//! Parse error types.

use htmllint_ast::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// An open marker appeared while another template expression was still
    /// pending.
    #[error("Unexpected `{marker}` inside a template expression; expected `{expected}` first")]
    #[diagnostic(
        code(htmllint::template::nested),
        help("template expressions cannot be nested; close the pending one with `{expected}`")
    )]
    NestedTemplateSyntax {
        /// The offending open marker.
        marker: String,
        /// Close marker of the pending expression.
        expected: String,
        #[label("opened here")]
        span: SourceSpan,
    },

    /// A template expression was still open at the end of the input.
    #[error("Unterminated template expression `{marker}`; expected `{expected}`")]
    #[diagnostic(code(htmllint::template::unterminated))]
    UnterminatedTemplateSyntax {
        /// The open marker left pending.
        marker: String,
        /// Close marker that never appeared.
        expected: String,
        #[label("never closed")]
        span: SourceSpan,
    },

    /// The source text is invalid.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred.
        offset: Option<usize>,
    },
}

impl ParseError {
    /// Creates a nested template syntax error.
    pub fn nested(marker: impl Into<String>, expected: impl Into<String>, span: Span) -> Self {
        Self::NestedTemplateSyntax {
            marker: marker.into(),
            expected: expected.into(),
            span: source_span(span),
        }
    }

    /// Creates an unterminated template syntax error.
    pub fn unterminated(
        marker: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnterminatedTemplateSyntax {
            marker: marker.into(),
            expected: expected.into(),
            span: source_span(span),
        }
    }

    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new invalid source error with offset.
    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Returns true for delimiter-matching failures.
    pub fn is_structural_conflict(&self) -> bool {
        matches!(
            self,
            Self::NestedTemplateSyntax { .. } | Self::UnterminatedTemplateSyntax { .. }
        )
    }

    /// Returns the offending marker text of a structural conflict.
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::NestedTemplateSyntax { marker, .. }
            | Self::UnterminatedTemplateSyntax { marker, .. } => Some(marker),
            _ => None,
        }
    }

    /// Returns the `[start, end)` position of a structural conflict.
    pub fn range(&self) -> Option<Span> {
        match self {
            Self::NestedTemplateSyntax { span, .. }
            | Self::UnterminatedTemplateSyntax { span, .. } => {
                let start = span.offset() as u32;
                Some(Span::new(start, start + span.len() as u32))
            }
            Self::InvalidSource {
                offset: Some(offset),
                ..
            } => Some(Span::new(*offset as u32, *offset as u32)),
            _ => None,
        }
    }

    /// Moves reported positions forward by `delta` bytes.
    pub(crate) fn shifted(self, delta: u32) -> Self {
        if delta == 0 {
            return self;
        }
        match self {
            Self::NestedTemplateSyntax {
                marker,
                expected,
                span,
            } => Self::NestedTemplateSyntax {
                marker,
                expected,
                span: shift_source_span(span, delta),
            },
            Self::UnterminatedTemplateSyntax {
                marker,
                expected,
                span,
            } => Self::UnterminatedTemplateSyntax {
                marker,
                expected,
                span: shift_source_span(span, delta),
            },
            Self::InvalidSource { message, offset } => Self::InvalidSource {
                message,
                offset: offset.map(|offset| offset + delta as usize),
            },
            other => other,
        }
    }
}

/// Converts a byte offset into a span offset.
///
/// Spans hold `u32` offsets, so text of 4 GiB or more is rejected.
pub(crate) fn source_offset(offset: usize) -> Result<u32, ParseError> {
    u32::try_from(offset).map_err(|_| {
        ParseError::invalid_source_at("text exceeds the 4 GiB addressable range", offset)
    })
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new((span.start as usize).into(), span.len() as usize)
}

fn shift_source_span(span: SourceSpan, delta: u32) -> SourceSpan {
    SourceSpan::new((span.offset() + delta as usize).into(), span.len())
}
