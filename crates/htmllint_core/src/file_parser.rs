//! Single file parsing.

use std::fs;
use std::path::Path;

use htmllint_parser::{ParseResult, Parser};
use tracing::{debug, warn};

use crate::LinterError;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads and parses one file.
///
/// Rejects anything that is not a regular file, files larger than
/// [`MAX_FILE_SIZE`], non-UTF-8 content and extensions the parser does not
/// handle. Files without an extension are parsed as-is.
pub fn parse_file<P: Parser>(path: &Path, parser: &P) -> Result<ParseResult, LinterError> {
    debug!("Parsing {}", path.display());

    if let Some(extension) = path.extension().and_then(|e| e.to_str())
        && !parser.can_parse(extension)
    {
        return Err(LinterError::file(format!(
            "Unsupported file type `{}` for the {} parser: {}",
            extension,
            parser.name(),
            path.display()
        )));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        warn!("Cannot read metadata for {}: {}", path.display(), e);
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        warn!(
            "Skipping {} ({} bytes exceeds {} bytes)",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE
        );
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let result = parser.parse(&content)?;
    debug!(
        "Parsed {} ({} nodes at top level, {} template expressions)",
        path.display(),
        result.ast.body.len(),
        result.templates.len()
    );
    Ok(result)
}
