//! Import extraction from source files.
//!
//! An [`ImportExtractor`] turns the text of one source file into the raw
//! import path strings it declares. Classification and resolution happen
//! later; extractors only parse.

mod go;

pub use go::GoImportExtractor;

use thiserror::Error;

/// Maximum source size accepted by extractors (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Errors produced while parsing a file's import declarations.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected 'package' clause")]
    MissingPackageClause { line: usize },

    #[error("line {line}: expected package name after 'package'")]
    MissingPackageName { line: usize },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: usize },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unterminated import group, expected ')'")]
    UnterminatedImportGroup { line: usize },

    #[error("line {line}: expected import path string")]
    MissingImportPath { line: usize },

    #[error("source is not valid UTF-8")]
    InvalidUtf8,

    #[error("file too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

/// Extracts raw import path strings from one source file.
pub trait ImportExtractor: Send + Sync + std::fmt::Debug {
    /// Parse `source` and return its import paths in declaration order.
    fn extract_imports(&self, source: &str) -> Result<Vec<String>, ParseError>;

    /// Decode raw bytes and extract imports.
    fn extract_from_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(ParseError::FileTooLarge {
                size: bytes.len(),
                max: MAX_FILE_SIZE,
            });
        }
        let source = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        self.extract_imports(source)
    }
}
