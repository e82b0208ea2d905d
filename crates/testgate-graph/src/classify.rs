//! Local import classification and resolution.
//!
//! An import is *local* when it names the project root. Local imports are
//! mapped onto the filesystem by re-rooting them at the directory that
//! contains the project root folder of the importing file:
//!
//! ```text
//! importer: /home/ci/src/proj/tests/api_test.go
//! import:   "proj/pkg/api"
//! resolved: /home/ci/src/proj/pkg/api
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::project_root::ProjectRoot;

/// How an import path is matched against the project root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalMatch {
    /// The root must be a whole `/`-separated segment of the import path.
    #[default]
    Segment,

    /// The root may appear anywhere in the import string.
    ///
    /// Looser fallback: `"myproj/x"` is local for root `proj`.
    Containment,
}

/// Whether an import refers to project-local code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Local,
    External,
}

/// Outcome of classifying and resolving one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Local import resolved to a filesystem path.
    Local(PathBuf),

    /// External library import, never part of the dependency set.
    External(String),
}

impl ResolveResult {
    pub fn is_local(&self) -> bool {
        matches!(self, ResolveResult::Local(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ResolveResult::External(_))
    }
}

impl fmt::Display for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveResult::Local(path) => write!(f, "Local({})", path.display()),
            ResolveResult::External(name) => write!(f, "External({})", name),
        }
    }
}

/// A local import that cannot be mapped onto the filesystem.
///
/// Always recoverable: the import is skipped and the scan continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("cannot resolve '{import}': project root '{root}' not found in importer path {}", .importer.display())]
    RootNotInPath {
        import: String,
        importer: PathBuf,
        root: String,
    },

    #[error("cannot resolve '{import}': resolved path {} escapes {}", .resolved.display(), .base.display())]
    EscapesBase {
        import: String,
        resolved: PathBuf,
        base: PathBuf,
    },
}

/// Classifies imports as local or external and resolves local ones.
#[derive(Debug, Clone)]
pub struct ImportClassifier {
    root: ProjectRoot,
    policy: LocalMatch,
}

impl ImportClassifier {
    pub fn new(root: ProjectRoot, policy: LocalMatch) -> Self {
        Self { root, policy }
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn policy(&self) -> LocalMatch {
        self.policy
    }

    /// Decide whether `import` refers to the project.
    pub fn classify(&self, import: &str) -> ImportKind {
        let root = self.root.as_str();
        let local = match self.policy {
            LocalMatch::Segment => import.split('/').any(|segment| segment == root),
            LocalMatch::Containment => import.contains(root),
        };

        if local {
            ImportKind::Local
        } else {
            ImportKind::External
        }
    }

    /// Map a local import onto the filesystem relative to `importer`.
    ///
    /// The base is the part of the importer's path before the project root;
    /// the import string is appended to it and the result lexically cleaned.
    pub fn resolve(&self, import: &str, importer: &Path) -> Result<PathBuf, ResolutionError> {
        let base = self
            .base_of(importer)
            .ok_or_else(|| ResolutionError::RootNotInPath {
                import: import.to_string(),
                importer: importer.to_path_buf(),
                root: self.root.as_str().to_string(),
            })?;

        let resolved = match self.policy {
            LocalMatch::Segment => base.join(import.trim_start_matches('/')),
            // Plain concatenation, mirroring the string-level match.
            LocalMatch::Containment => {
                PathBuf::from(format!("{}{}", base.to_string_lossy(), import))
            }
        }
        .clean();

        let inside = match self.policy {
            LocalMatch::Segment => resolved.starts_with(&base),
            // The base may end partway through a folder name (`/ci/my` for `myproj`).
            LocalMatch::Containment => resolved
                .to_string_lossy()
                .starts_with(base.to_string_lossy().as_ref()),
        };
        if !inside {
            return Err(ResolutionError::EscapesBase {
                import: import.to_string(),
                resolved,
                base,
            });
        }

        Ok(resolved)
    }

    /// Classify `import` and, if local, resolve it against `importer`.
    pub fn classify_and_resolve(
        &self,
        import: &str,
        importer: &Path,
    ) -> Result<ResolveResult, ResolutionError> {
        match self.classify(import) {
            ImportKind::External => Ok(ResolveResult::External(import.to_string())),
            ImportKind::Local => self.resolve(import, importer).map(ResolveResult::Local),
        }
    }

    /// Identifier of `path` anchored at the project root.
    ///
    /// Segment matching anchors at the first component equal to the root;
    /// containment matching anchors at the first occurrence of the root in
    /// the path string, so `/ci/myproj/a.go` becomes `proj/a.go`.
    pub fn anchor(&self, path: &Path) -> Option<String> {
        match self.policy {
            LocalMatch::Segment => self.root.anchor(path),
            LocalMatch::Containment => {
                let path = path.to_string_lossy().replace('\\', "/");
                let index = path.find(self.root.as_str())?;
                Some(path[index..].to_string())
            }
        }
    }

    fn base_of(&self, importer: &Path) -> Option<PathBuf> {
        match self.policy {
            LocalMatch::Segment => {
                let index = self.root.component_index(importer)?;
                Some(importer.components().take(index).collect())
            }
            LocalMatch::Containment => {
                let importer = importer.to_string_lossy();
                let index = importer.find(self.root.as_str())?;
                Some(PathBuf::from(&importer[..index]))
            }
        }
    }
}
