//! Per-directory scan.
//!
//! A scan reads one directory's retained files, extracts and classifies their
//! imports, and reports what it found. It never recurses; the caller decides
//! which of the returned directories to visit next.

use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::classify::{ImportClassifier, ResolveResult};
use crate::config::BuilderConfig;
use crate::dependency_set::DependencySet;
use crate::extract::ImportExtractor;
use crate::runtime::Runtime;

use super::GraphError;

/// Result of scanning one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    /// Retained files plus local imports that resolved to files.
    pub units: DependencySet,

    /// Local imports that resolved to directories, in discovery order.
    pub directories: Vec<PathBuf>,
}

pub(super) fn scan_directory(
    dir: &Path,
    tests_only: bool,
    config: &BuilderConfig,
    classifier: &ImportClassifier,
    runtime: &dyn Runtime,
    extractor: &dyn ImportExtractor,
) -> Result<DirectoryScan, GraphError> {
    let names = runtime
        .read_dir(dir)
        .map_err(|source| GraphError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut scan = DirectoryScan::default();

    for name in names {
        if !config.conventions.retains(&name, tests_only) {
            trace!(file = %name, tests_only, "skipping file");
            continue;
        }

        let path = dir.join(&name);
        let metadata = runtime
            .metadata(&path)
            .map_err(|source| GraphError::FileRead {
                path: path.clone(),
                source,
            })?;
        if !metadata.is_file {
            continue;
        }

        scan.units.insert(unit_id(classifier, &path));

        let bytes = runtime
            .read_file(&path)
            .map_err(|source| GraphError::FileRead {
                path: path.clone(),
                source,
            })?;
        let imports = extractor
            .extract_from_bytes(&bytes)
            .map_err(|source| GraphError::Parse {
                path: path.clone(),
                source,
            })?;

        for import in imports {
            match classifier.classify_and_resolve(&import, &path) {
                Ok(ResolveResult::External(_)) => {}
                Ok(ResolveResult::Local(resolved)) => match runtime.metadata(&resolved) {
                    Ok(target) if target.is_dir => scan.directories.push(resolved),
                    Ok(_) => {
                        scan.units.insert(unit_id(classifier, &resolved));
                    }
                    Err(e) => {
                        // Keep the import itself so a matching change still triggers a run.
                        let fallback = classifier
                            .anchor(Path::new(&import))
                            .unwrap_or_else(|| import.clone());
                        warn!(
                            file = %path.display(),
                            import = %import,
                            error = %e,
                            "local import target not found, recording import path"
                        );
                        scan.units.insert(fallback);
                    }
                },
                Err(e) => {
                    warn!(file = %path.display(), "skipping import: {e}");
                }
            }
        }
    }

    Ok(scan)
}

/// Identifier of a file in the dependency set.
fn unit_id(classifier: &ImportClassifier, path: &Path) -> String {
    classifier.anchor(path).unwrap_or_else(|| {
        warn!(
            path = %path.display(),
            root = %classifier.root(),
            "file is outside the project root, using its full path as identifier"
        );
        path.to_string_lossy().into_owned()
    })
}
