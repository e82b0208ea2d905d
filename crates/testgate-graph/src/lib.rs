//! # testgate-graph
//!
//! Change-impact analysis for Go test suites.
//!
//! Given a directory of tests and the set of files modified since a baseline
//! revision, this crate answers one question: do the tests need to run again?
//! It builds the transitive set of project-local source files the tests import,
//! then checks whether any modified file falls inside that set.
//!
//! ## Architecture
//!
//! ```text
//!   test dir ──▶ GraphBuilder ──────────────▶ DependencySet ─┐
//!                 │        │                                  │
//!                 ▼        ▼                                  ▼
//!        ImportExtractor  ImportClassifier            decide() ──▶ Verdict
//!        (import clauses) (local vs external)                 ▲
//!                                                             │
//!   baseline rev ──▶ ChangeSource (git diff) ──▶ ChangeSet ───┘
//! ```
//!
//! - [`extract`] - import clause extraction (collaborator, Go by default)
//! - [`classify`] - local/external classification and path resolution
//! - [`walker`] - worklist traversal producing a [`DependencySet`]
//! - [`changes`] - change sets and the `git diff` collaborator
//! - [`decision`] - the pure run/skip decision
//! - [`runtime`] - filesystem seam used by the walker
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use testgate_graph::{
//!     BuilderConfig, ChangeSet, GraphBuilder, MatchPolicy, NativeRuntime, ProjectRoot, decide,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = ProjectRoot::new("proj")?;
//! let builder = GraphBuilder::new(BuilderConfig::new(root.clone()), NativeRuntime::new());
//! let deps = builder.build_dependencies(Path::new("/src/proj/tests"), true)?;
//!
//! let changes = ChangeSet::from_paths(&root, ["pkg/a.go"]);
//! let verdict = decide(&deps, &changes, MatchPolicy::Containment);
//! println!("{verdict}");
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod classify;
pub mod config;
pub mod decision;
pub mod dependency_set;
pub mod extract;
pub mod project_root;
pub mod runtime;
pub mod walker;

pub use changes::{ChangeSet, ChangeSource, DEFAULT_DIFF_TIMEOUT, DiffError, GitDiff};
pub use classify::{ImportClassifier, ImportKind, LocalMatch, ResolutionError, ResolveResult};
pub use config::{BuilderConfig, DEFAULT_MAX_DEPTH, FileConventions, PatternError};
pub use decision::{MatchPolicy, Verdict, decide};
pub use dependency_set::DependencySet;
pub use extract::{GoImportExtractor, ImportExtractor, ParseError};
pub use project_root::{InvalidProjectRoot, ProjectRoot};
pub use runtime::native::NativeRuntime;
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use walker::{GraphBuilder, GraphError};
