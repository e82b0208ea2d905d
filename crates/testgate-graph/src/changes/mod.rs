//! Change sets: the paths modified relative to a baseline revision.

mod git;

pub use git::{DEFAULT_DIFF_TIMEOUT, GitDiff};

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::project_root::ProjectRoot;

/// Errors from the version-control collaborator.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to run {program}: {reason}")]
    Invocation { program: String, reason: String },

    #[error("{program} exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
}

impl DiffError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DiffError::Timeout { .. })
    }
}

/// Source of changed paths for one run.
pub trait ChangeSource {
    /// Paths changed since the baseline, relative to the repository root.
    fn changed_paths(&self) -> Result<Vec<String>, DiffError>;
}

/// Changed paths anchored at the project root, in reported order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<String>,
}

impl ChangeSet {
    /// Anchor repository-relative paths at `root`. Blank entries are dropped.
    pub fn from_paths<I, S>(root: &ProjectRoot, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| root.join(&p))
            .collect();
        Self { paths }
    }

    /// Parse newline-separated `git diff --name-only` output.
    pub fn from_diff_output(root: &ProjectRoot, output: &str) -> Self {
        Self::from_paths(root, output.lines())
    }

    /// Query a [`ChangeSource`] and anchor its paths.
    pub fn resolve(root: &ProjectRoot, source: &dyn ChangeSource) -> Result<Self, DiffError> {
        Ok(Self::from_paths(root, source.changed_paths()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(path)?;
        }
        Ok(())
    }
}
