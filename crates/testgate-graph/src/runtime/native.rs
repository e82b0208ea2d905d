//! Native Runtime Implementation
//!
//! Thin wrapper over `std::fs` for the real filesystem.

use std::io;
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn map_io_error(path: &Path, action: &str, e: io::Error) -> RuntimeError {
    match e.kind() {
        io::ErrorKind::NotFound => RuntimeError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => RuntimeError::PermissionDenied(path.to_path_buf()),
        _ => RuntimeError::Io(format!("Failed to {} {}: {}", action, path.display(), e)),
    }
}

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, "read", e))
    }

    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, "stat", e))?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
        })
    }

    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, "list", e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, "list", e))?;
            // Non UTF-8 names cannot be Go source files
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        // Directory order is platform dependent
        names.sort();
        Ok(names)
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        path.canonicalize()
            .map_err(|e| map_io_error(path, "canonicalize", e))
    }
}
