//! The project root token that anchors the local module namespace.

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

/// Error returned when a project root name cannot anchor a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProjectRoot {
    #[error("project root name cannot be empty")]
    Empty,

    #[error("project root '{0}' must be a single folder name without path separators")]
    ContainsSeparator(String),

    #[error("project root '{0}' cannot be '.' or '..'")]
    Relative(String),
}

/// Folder name identifying the boundary of local source.
///
/// Import paths and file paths are compared against this token to decide
/// what belongs to the project. A `ProjectRoot` is a single folder name:
/// it is never empty and never contains `/` or `\`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRoot(String);

impl ProjectRoot {
    /// Validate and wrap a folder name.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidProjectRoot> {
        let name = name.into();
        let trimmed = name.trim_matches(|c| c == '/' || c == '\\');

        if trimmed.is_empty() {
            return Err(InvalidProjectRoot::Empty);
        }
        if trimmed.contains(['/', '\\']) {
            return Err(InvalidProjectRoot::ContainsSeparator(name));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(InvalidProjectRoot::Relative(name));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Index of the first path component equal to the root, if any.
    pub(crate) fn component_index(&self, path: &Path) -> Option<usize> {
        path.components()
            .position(|c| matches!(c, Component::Normal(name) if name == self.0.as_str()))
    }

    /// Anchor a filesystem path at the project root.
    ///
    /// Returns the `/`-joined suffix of `path` starting at the first component
    /// equal to the root, e.g. `/home/ci/proj/pkg/a.go` → `proj/pkg/a.go`.
    /// Returns `None` when no component matches.
    pub fn anchor(&self, path: &Path) -> Option<String> {
        let index = self.component_index(path)?;
        let parts: Vec<_> = path
            .components()
            .skip(index)
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(parts.join("/"))
    }

    /// Join a repository-relative path onto the root, normalizing separators.
    ///
    /// `pkg\\a.go` and `./pkg/a.go` both become `proj/pkg/a.go`.
    pub fn join(&self, relative: &str) -> String {
        let normalized = relative.replace('\\', "/");
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        if segments.is_empty() {
            self.0.clone()
        } else {
            format!("{}/{}", self.0, segments.join("/"))
        }
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectRoot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
