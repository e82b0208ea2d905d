//! Filesystem abstraction for graph construction.
//!
//! The walker never touches `std::fs` directly. It goes through the `Runtime`
//! trait so traversal logic can be exercised against any filesystem view.

pub mod native;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File or directory not found
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission denied
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Platform runtime trait
///
/// All operations are blocking; analysis runs on a single call stack.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata, following symlinks
    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// List the entry names of a directory
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Resolve a path to its canonical absolute form
    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;
}
