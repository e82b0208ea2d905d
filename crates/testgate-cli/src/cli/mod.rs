//! Command-line interface definition for testgate.
//!
//! Every analysis option is optional at the clap level so that values can
//! also come from `TESTGATE_*` environment variables; required values are
//! enforced when the layered configuration is validated.

pub mod enums;
mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use enums::*;
pub use validation::{parse_base_folder_name, parse_timeout_secs};

/// testgate - decide whether a Go test suite needs to run
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "testgate",
    version,
    about = "Decide whether a Go test suite needs to run",
    long_about = "testgate builds the set of project-local source files a test directory\n\
                  transitively imports and compares it with the files changed since a\n\
                  baseline revision. Exit code 0 means SKIP, 1 means RUN, 2 means ERROR."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all diagnostics except errors
    ///
    /// The verdict is still printed on stdout.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Directory containing the tests to analyze
    ///
    /// Relative paths are resolved against the current directory.
    #[arg(long, value_name = "PATH")]
    pub test_dir: Option<PathBuf>,

    /// Folder name that marks project-local code in import paths
    #[arg(long, value_name = "NAME", value_parser = parse_base_folder_name)]
    pub base_folder_name: Option<String>,

    /// Baseline revision to diff the working tree against
    #[arg(
        long,
        value_name = "REV",
        visible_alias = "master-repo-branch-name"
    )]
    pub comparison_branch_name: Option<String>,

    /// How changed files are matched against dependencies [default: containment]
    #[arg(long, value_enum)]
    pub match_policy: Option<MatchPolicyArg>,

    /// How imports are recognised as local [default: segment]
    #[arg(long, value_enum)]
    pub local_match: Option<LocalMatchArg>,

    /// Maximum import depth before the analysis fails [default: 1000]
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Seconds to wait for `git diff` before assuming a change [default: 30]
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_secs)]
    pub diff_timeout: Option<u64>,

    /// Regex selecting source files by name [default: \.go$]
    #[arg(long, value_name = "REGEX")]
    pub source_pattern: Option<String>,

    /// Regex selecting test files by name [default: test\.go$]
    #[arg(long, value_name = "REGEX")]
    pub test_pattern: Option<String>,

    /// Repository to run `git diff` in [default: current directory]
    #[arg(long, value_name = "PATH")]
    pub repo_dir: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}
