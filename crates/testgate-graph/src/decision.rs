//! Run/skip decision.
//!
//! Pure function over a [`DependencySet`] and a [`ChangeSet`]. The first
//! changed path that matches a dependency decides the run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::changes::ChangeSet;
use crate::dependency_set::DependencySet;

/// How a changed path is matched against dependency identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// The changed path must equal a dependency identifier.
    Exact,

    /// Exact match first, then any dependency identifier contained in the
    /// changed path. Over-triggers on short identifiers; never misses an
    /// exact match.
    #[default]
    Containment,
}

/// Outcome of the impact analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    /// No changed path touches a dependency.
    Skip,

    /// `changed` matched `dependency`.
    Run { changed: String, dependency: String },
}

impl Verdict {
    pub fn should_run(&self) -> bool {
        matches!(self, Verdict::Run { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Skip => f.write_str("SKIP: no modified dependency found"),
            Verdict::Run {
                changed,
                dependency,
            } if changed == dependency => write!(f, "RUN: {changed} was modified"),
            Verdict::Run {
                changed,
                dependency,
            } => write!(f, "RUN: {changed} was modified (matches {dependency})"),
        }
    }
}

/// Decide whether the tests behind `dependencies` must run for `changes`.
pub fn decide(dependencies: &DependencySet, changes: &ChangeSet, policy: MatchPolicy) -> Verdict {
    // Sorted so the reported trigger is deterministic.
    let candidates = match policy {
        MatchPolicy::Exact => Vec::new(),
        MatchPolicy::Containment => dependencies.sorted(),
    };

    for changed in changes.iter() {
        if dependencies.contains(changed) {
            return Verdict::Run {
                changed: changed.to_string(),
                dependency: changed.to_string(),
            };
        }

        if let Some(dependency) = candidates
            .iter()
            .find(|dep| !dep.is_empty() && changed.contains(**dep))
        {
            return Verdict::Run {
                changed: changed.to_string(),
                dependency: dependency.to_string(),
            };
        }
    }

    Verdict::Skip
}
