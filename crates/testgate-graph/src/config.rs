//! Configuration types for dependency graph construction.

use regex::Regex;
use thiserror::Error;

use crate::classify::LocalMatch;
use crate::project_root::ProjectRoot;

/// Default maximum directory depth for graph traversal.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// File-name pattern selecting Go source files.
pub const DEFAULT_SOURCE_PATTERN: &str = r"\.go$";

/// File-name pattern selecting Go test files.
pub const DEFAULT_TEST_PATTERN: &str = r"test\.go$";

/// Invalid file-name pattern.
#[derive(Debug, Error)]
#[error("invalid {kind} file pattern '{pattern}': {source}")]
pub struct PatternError {
    pub kind: &'static str,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// File-naming conventions deciding which directory entries are scanned.
#[derive(Debug, Clone)]
pub struct FileConventions {
    source: Regex,
    test: Regex,
}

impl FileConventions {
    /// Build conventions from source and test file-name patterns.
    pub fn new(source_pattern: &str, test_pattern: &str) -> Result<Self, PatternError> {
        let source = Regex::new(source_pattern).map_err(|source| PatternError {
            kind: "source",
            pattern: source_pattern.to_string(),
            source,
        })?;
        let test = Regex::new(test_pattern).map_err(|source| PatternError {
            kind: "test",
            pattern: test_pattern.to_string(),
            source,
        })?;
        Ok(Self { source, test })
    }

    /// Go conventions: `*.go` sources, `*test.go` tests.
    pub fn go() -> Self {
        Self {
            source: Regex::new(DEFAULT_SOURCE_PATTERN).expect("default source pattern is valid"),
            test: Regex::new(DEFAULT_TEST_PATTERN).expect("default test pattern is valid"),
        }
    }

    pub fn is_source(&self, file_name: &str) -> bool {
        self.source.is_match(file_name)
    }

    pub fn is_test(&self, file_name: &str) -> bool {
        self.test.is_match(file_name)
    }

    /// Whether a file is retained when scanning a directory.
    ///
    /// Every retained file must look like source; with `tests_only` it must
    /// also look like a test.
    pub fn retains(&self, file_name: &str, tests_only: bool) -> bool {
        self.is_source(file_name) && (!tests_only || self.is_test(file_name))
    }
}

impl Default for FileConventions {
    fn default() -> Self {
        Self::go()
    }
}

/// Configuration for [`GraphBuilder`](crate::walker::GraphBuilder).
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Folder name anchoring local imports.
    pub root: ProjectRoot,

    /// How imports are matched against the root.
    pub local_match: LocalMatch,

    /// Which files are scanned.
    pub conventions: FileConventions,

    /// Maximum directory depth below the starting directory.
    ///
    /// Default: `DEFAULT_MAX_DEPTH` (1000)
    pub max_depth: usize,
}

impl BuilderConfig {
    pub fn new(root: ProjectRoot) -> Self {
        Self {
            root,
            local_match: LocalMatch::default(),
            conventions: FileConventions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn local_match(mut self, policy: LocalMatch) -> Self {
        self.local_match = policy;
        self
    }

    pub fn conventions(mut self, conventions: FileConventions) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
