//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;
use testgate_graph::{DiffError, GraphError};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Graph(e) => graph_error_to_miette(e),
        CliError::Diff(e) => diff_error_to_miette(e),
        CliError::Config(e @ ConfigError::Pattern(_)) => ::miette::miette!(
            "{}\n\nHint: Check --source-pattern and --test-pattern (TESTGATE_SOURCE_PATTERN, TESTGATE_TEST_PATTERN)",
            e
        ),
        CliError::Config(e) => ::miette::miette!("{}", e),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert GraphError to miette Report
pub fn graph_error_to_miette(err: GraphError) -> Report {
    match &err {
        GraphError::DirectoryRead { path, .. } => ::miette::miette!(
            "{}\n\nHint: Check that {} exists and is readable",
            err,
            path.display()
        ),
        GraphError::Parse { .. } => ::miette::miette!(
            "{}\n\nHint: Fix the package or import clause; a file that cannot be parsed blocks the analysis",
            err
        ),
        GraphError::CycleOrDepthExceeded { .. } => ::miette::miette!(
            "{}\n\nHint: Raise --max-depth if the import chain is legitimately this deep",
            err
        ),
        GraphError::FileRead { .. } => ::miette::miette!("{}", err),
    }
}

/// Convert DiffError to miette Report
pub fn diff_error_to_miette(err: DiffError) -> Report {
    match &err {
        DiffError::Invocation { .. } => {
            ::miette::miette!("{}\n\nHint: Make sure git is installed and on PATH", err)
        }
        DiffError::NonZeroExit { .. } => ::miette::miette!(
            "{}\n\nHint: Check --comparison-branch-name and --repo-dir",
            err
        ),
        DiffError::Timeout { .. } => ::miette::miette!("{}", err),
    }
}
