//! # htmllint_core
//!
//! File-level entry points for htmllint.
//!
//! This crate provides:
//! - Configuration loading from `.htmllint.jsonc` / `.htmllint.json`
//! - Parsing of files on disk with size and type checks
//!
//! ## Example
//!
//! ```rust,ignore
//! use htmllint_core::{LinterConfig, parse_file};
//! use htmllint_parser::HtmlParser;
//!
//! let config = LinterConfig::load(".")?;
//! let parser = HtmlParser::with_options(MyTreeConstructor, config.parser_options());
//!
//! let result = parse_file("index.html".as_ref(), &parser)?;
//! println!("{} top-level nodes", result.ast.body.len());
//! ```

mod config;
mod error;
mod file_parser;

pub use config::LinterConfig;
pub use error::LinterError;
pub use file_parser::{MAX_FILE_SIZE, parse_file};
