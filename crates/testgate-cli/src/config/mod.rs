//! Layered configuration for a testgate run.
//!
//! Values are merged from three sources, later ones winning:
//! built-in defaults, `TESTGATE_*` environment variables, then CLI flags.
//! The merged [`TestgateConfig`] is validated into [`RunSettings`].

mod loading;
mod tests;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use testgate_graph::config::{DEFAULT_SOURCE_PATTERN, DEFAULT_TEST_PATTERN};
use testgate_graph::{
    DEFAULT_DIFF_TIMEOUT, DEFAULT_MAX_DEPTH, FileConventions, LocalMatch, MatchPolicy,
    ProjectRoot,
};

use crate::error::{ConfigError, Result};

/// Prefix of the environment variables read by [`TestgateConfig::load`].
pub const ENV_PREFIX: &str = "TESTGATE_";

/// Merged, unvalidated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestgateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_folder_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_branch_name: Option<String>,

    pub match_policy: MatchPolicy,

    pub local_match: LocalMatch,

    pub max_depth: usize,

    /// Seconds.
    pub diff_timeout: u64,

    pub source_pattern: String,

    pub test_pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_dir: Option<PathBuf>,

    pub json: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Absolute test directory.
    pub test_dir: PathBuf,
    pub root: ProjectRoot,
    pub base_revision: String,
    pub match_policy: MatchPolicy,
    pub local_match: LocalMatch,
    pub max_depth: usize,
    pub diff_timeout: Duration,
    pub conventions: FileConventions,
    pub repo_dir: Option<PathBuf>,
    pub json: bool,
}

impl TestgateConfig {
    /// Built-in defaults. The three required options have none.
    pub fn default_config() -> Self {
        Self {
            test_dir: None,
            base_folder_name: None,
            comparison_branch_name: None,
            match_policy: MatchPolicy::default(),
            local_match: LocalMatch::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            diff_timeout: DEFAULT_DIFF_TIMEOUT.as_secs(),
            source_pattern: DEFAULT_SOURCE_PATTERN.to_string(),
            test_pattern: DEFAULT_TEST_PATTERN.to_string(),
            repo_dir: None,
            json: false,
        }
    }

    /// Check required options and resolve relative paths against `cwd`.
    pub fn into_settings(self, cwd: &Path) -> Result<RunSettings> {
        let test_dir = self.test_dir.ok_or_else(|| ConfigError::MissingField {
            field: "test_dir".to_string(),
            hint: "Pass --test-dir <PATH> or set TESTGATE_TEST_DIR".to_string(),
        })?;

        let base_folder_name = self.base_folder_name.ok_or_else(|| ConfigError::MissingField {
            field: "base_folder_name".to_string(),
            hint: "Pass --base-folder-name <NAME> or set TESTGATE_BASE_FOLDER_NAME".to_string(),
        })?;
        let root = ProjectRoot::new(base_folder_name).map_err(ConfigError::from)?;

        let base_revision = self
            .comparison_branch_name
            .map(|rev| rev.trim().to_string())
            .filter(|rev| !rev.is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                field: "comparison_branch_name".to_string(),
                hint: "Pass --comparison-branch-name <REV> or set TESTGATE_COMPARISON_BRANCH_NAME"
                    .to_string(),
            })?;

        if self.diff_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "diff_timeout".to_string(),
                value: "0".to_string(),
                hint: "Use a timeout of at least 1 second".to_string(),
            }
            .into());
        }

        let conventions = FileConventions::new(&self.source_pattern, &self.test_pattern)
            .map_err(ConfigError::from)?;

        Ok(RunSettings {
            test_dir: resolve_path(&test_dir, cwd),
            root,
            base_revision,
            match_policy: self.match_policy,
            local_match: self.local_match,
            max_depth: self.max_depth,
            diff_timeout: Duration::from_secs(self.diff_timeout),
            conventions,
            repo_dir: self.repo_dir.map(|dir| resolve_path(&dir, cwd)),
            json: self.json,
        })
    }
}

impl Default for TestgateConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Resolve a path relative to `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
