//! Program text to submit for tracing
//!
//! Mirrors the checks the tracing service applies on upload so a bad file is
//! reported before any request is made.

use crate::config::{MAX_SOURCE_CHARS, SOURCE_EXTENSION};
use crate::errors::SourceError;
use std::fs;
use std::path::Path;

/// Read a source file and return the text to submit
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(SourceError::InvalidExtension {
            expected: SOURCE_EXTENSION,
        });
    }

    let raw = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })?;
    prepare_code(&raw)
}

/// Trim surrounding whitespace and enforce the service limits. The trimmed
/// text is what gets submitted, so step line numbers refer to it.
pub fn prepare_code(raw: &str) -> Result<String, SourceError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(SourceError::Empty);
    }

    let len = code.chars().count();
    if len > MAX_SOURCE_CHARS {
        return Err(SourceError::TooLong {
            len,
            limit: MAX_SOURCE_CHARS,
        });
    }

    Ok(code.to_string())
}
