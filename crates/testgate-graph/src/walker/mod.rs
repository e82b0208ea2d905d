//! Dependency graph builder.
//!
//! Expands the local imports of a test directory into the full set of source
//! units it transitively depends on. Traversal is an explicit breadth-first
//! worklist over directories with a visited set keyed by canonical path, so
//! symlinked or self-referencing imports cannot loop.

mod scan;

pub use scan::DirectoryScan;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::classify::ImportClassifier;
use crate::config::BuilderConfig;
use crate::dependency_set::DependencySet;
use crate::extract::{GoImportExtractor, ImportExtractor, ParseError};
use crate::runtime::{Runtime, RuntimeError};

/// Error that can occur while building a dependency set.
///
/// All variants are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Failed to read directory '{}': {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Failed to parse imports in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Maximum depth exceeded at '{}': depth {depth} (max: {max}), imports may form a cycle", .path.display())]
    CycleOrDepthExceeded {
        path: PathBuf,
        depth: usize,
        max: usize,
    },
}

/// Builds [`DependencySet`]s by walking local imports.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: BuilderConfig,
    classifier: ImportClassifier,
    runtime: Arc<dyn Runtime>,
    extractor: Arc<dyn ImportExtractor>,
}

impl GraphBuilder {
    /// Create a builder using the Go import extractor.
    pub fn new(config: BuilderConfig, runtime: impl Runtime + 'static) -> Self {
        let classifier = ImportClassifier::new(config.root.clone(), config.local_match);
        Self {
            config,
            classifier,
            runtime: Arc::new(runtime),
            extractor: Arc::new(GoImportExtractor::new()),
        }
    }

    /// Replace the import extractor.
    pub fn with_extractor(mut self, extractor: impl ImportExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Collect every local source unit reachable from `root_dir`.
    ///
    /// With `tests_only`, only test files of `root_dir` itself are scanned.
    /// Directories reached through imports are always scanned in full.
    /// The returned set also contains the scanned files themselves, so a
    /// change to a test file always counts as a change to its dependencies.
    pub fn build_dependencies(
        &self,
        root_dir: &Path,
        tests_only: bool,
    ) -> Result<DependencySet, GraphError> {
        let mut dependencies = DependencySet::new();
        let mut visited: FxHashSet<(PathBuf, bool)> = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back((root_dir.to_path_buf(), tests_only, 0usize));

        while let Some((dir, tests_only, depth)) = queue.pop_front() {
            let canonical =
                self.runtime
                    .canonicalize(&dir)
                    .map_err(|source| GraphError::DirectoryRead {
                        path: dir.clone(),
                        source,
                    })?;
            // Breadth-first order reaches every directory first at its shallowest depth.
            if !visited.insert((canonical, tests_only)) {
                continue;
            }

            if depth > self.config.max_depth {
                return Err(GraphError::CycleOrDepthExceeded {
                    path: dir,
                    depth,
                    max: self.config.max_depth,
                });
            }

            let scan = self.scan_directory(&dir, tests_only)?;
            debug!(
                dir = %dir.display(),
                depth,
                units = scan.units.len(),
                subdirs = scan.directories.len(),
                "scanned directory"
            );

            dependencies.extend(scan.units);
            for subdir in scan.directories {
                queue.push_back((subdir, false, depth + 1));
            }
        }

        info!(
            root = %root_dir.display(),
            directories = visited.len(),
            units = dependencies.len(),
            "dependency set built"
        );
        Ok(dependencies)
    }

    /// Scan one directory without following its imports.
    pub fn scan_directory(&self, dir: &Path, tests_only: bool) -> Result<DirectoryScan, GraphError> {
        scan::scan_directory(
            dir,
            tests_only,
            &self.config,
            &self.classifier,
            self.runtime.as_ref(),
            self.extractor.as_ref(),
        )
    }
}
