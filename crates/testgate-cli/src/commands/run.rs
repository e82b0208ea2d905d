//! Run command implementation.
//!
//! Builds the dependency set of the test directory, asks git which files
//! changed since the baseline, and decides whether the tests must run.

use std::path::Path;

use serde::Serialize;
use testgate_graph::{
    BuilderConfig, ChangeSet, ChangeSource, DependencySet, DiffError, GitDiff, GraphBuilder,
    NativeRuntime, Verdict, decide,
};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::commands::Outcome;
use crate::config::{RunSettings, TestgateConfig};
use crate::error::Result;
use crate::ui;

/// Everything a completed analysis produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub outcome: Outcome,
    pub dependencies: DependencySet,

    /// `None` when change detection timed out.
    pub changes: Option<ChangeSet>,
}

/// Execute the run command.
///
/// 1. Merge defaults, environment and flags into [`RunSettings`]
/// 2. Build the dependency set of the test directory
/// 3. List changed files with `git diff --name-only -z <rev>`
/// 4. Print the verdict on stdout
///
/// # Errors
///
/// Returns errors for invalid configuration, unreadable or unparsable
/// source, and a failing `git diff`. A timed-out diff is not an error.
pub fn execute(args: &Cli) -> Result<Outcome> {
    let cwd = std::env::current_dir()?;
    let settings = TestgateConfig::load(args)?.into_settings(&cwd)?;

    let mut git = GitDiff::new(settings.base_revision.clone()).timeout(settings.diff_timeout);
    if let Some(dir) = &settings.repo_dir {
        git = git.repo_dir(dir.clone());
    }

    let analysis = analyze(&settings, &git)?;

    if !args.quiet {
        if let Outcome::DiffTimedOut { timeout } = &analysis.outcome {
            ui::warning(&format!(
                "git diff did not finish within {}s, assuming the tests must run",
                timeout.as_secs()
            ));
        } else if !settings.json {
            ui::info(&format!(
                "{} dependencies checked against {} changed files since {}",
                analysis.dependencies.len(),
                analysis.changes.as_ref().map_or(0, ChangeSet::len),
                settings.base_revision
            ));
        }
    }

    if settings.json {
        let report = JsonReport::new(&settings, &analysis);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", ui::format_verdict(&analysis.outcome));
    }

    Ok(analysis.outcome)
}

/// Analyze `settings.test_dir` against the paths reported by `source`.
pub fn analyze(settings: &RunSettings, source: &dyn ChangeSource) -> Result<Analysis> {
    let config = BuilderConfig::new(settings.root.clone())
        .local_match(settings.local_match)
        .conventions(settings.conventions.clone())
        .max_depth(settings.max_depth);
    let builder = GraphBuilder::new(config, NativeRuntime::new());

    debug!(
        test_dir = %settings.test_dir.display(),
        root = %settings.root,
        "building dependency set"
    );
    let dependencies = builder.build_dependencies(&settings.test_dir, true)?;
    debug!("tests import these files:\n{dependencies}");

    let changes = match ChangeSet::resolve(&settings.root, source) {
        Ok(changes) => changes,
        Err(DiffError::Timeout { timeout, .. }) => {
            debug!(timeout_secs = timeout.as_secs(), "change detection timed out");
            return Ok(Analysis {
                outcome: Outcome::DiffTimedOut { timeout },
                dependencies,
                changes: None,
            });
        }
        Err(e) => return Err(e.into()),
    };
    debug!("files from git diff:\n{changes}");

    let verdict = decide(&dependencies, &changes, settings.match_policy);
    info!(
        dependencies = dependencies.len(),
        changed = changes.len(),
        run = verdict.should_run(),
        "analysis complete"
    );

    Ok(Analysis {
        outcome: Outcome::Decided(verdict),
        dependencies,
        changes: Some(changes),
    })
}

/// Machine-readable verdict printed with `--json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    verdict: ReportVerdict<'a>,
    test_dir: &'a Path,
    base_revision: &'a str,

    /// Sorted unit ids.
    dependencies: &'a DependencySet,

    /// Anchored changed paths; absent when the diff timed out.
    #[serde(skip_serializing_if = "Option::is_none")]
    changed_files: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ReportVerdict<'a> {
    Decided(&'a Verdict),
    TimedOut {
        verdict: &'static str,
        reason: &'static str,
        timeout_secs: u64,
    },
}

impl<'a> JsonReport<'a> {
    fn new(settings: &'a RunSettings, analysis: &'a Analysis) -> Self {
        let verdict = match &analysis.outcome {
            Outcome::Decided(verdict) => ReportVerdict::Decided(verdict),
            Outcome::DiffTimedOut { timeout } => ReportVerdict::TimedOut {
                verdict: "run",
                reason: "diff_timeout",
                timeout_secs: timeout.as_secs(),
            },
        };

        Self {
            verdict,
            test_dir: &settings.test_dir,
            base_revision: &settings.base_revision,
            dependencies: &analysis.dependencies,
            changed_files: analysis
                .changes
                .as_ref()
                .map(|changes| changes.iter().collect()),
        }
    }
}
