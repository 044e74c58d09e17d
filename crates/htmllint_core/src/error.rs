//! Linter error types.

use htmllint_parser::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while loading configuration or parsing files.
#[derive(Debug, Error, Diagnostic)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(htmllint::config))]
    Config(String),

    /// File error.
    #[error("File error: {0}")]
    #[diagnostic(code(htmllint::file))]
    File(String),

    /// Parse error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
