use clap::ValueEnum;
use testgate_graph::{LocalMatch, MatchPolicy};

/// How changed files are matched against dependencies
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum MatchPolicyArg {
    /// A changed file must equal a dependency identifier
    #[value(name = "exact")]
    Exact,

    /// Exact match first, then any dependency contained in the changed path
    ///
    /// Over-triggers on short identifiers but never misses an exact match.
    #[value(name = "containment")]
    Containment,
}

impl From<MatchPolicyArg> for MatchPolicy {
    fn from(arg: MatchPolicyArg) -> Self {
        match arg {
            MatchPolicyArg::Exact => MatchPolicy::Exact,
            MatchPolicyArg::Containment => MatchPolicy::Containment,
        }
    }
}

/// How import paths are recognised as project-local
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum LocalMatchArg {
    /// The base folder name must be a whole segment of the import path
    #[value(name = "segment")]
    Segment,

    /// The base folder name may appear anywhere in the import path
    #[value(name = "containment")]
    Containment,
}

impl From<LocalMatchArg> for LocalMatch {
    fn from(arg: LocalMatchArg) -> Self {
        match arg {
            LocalMatchArg::Segment => LocalMatch::Segment,
            LocalMatchArg::Containment => LocalMatch::Containment,
        }
    }
}
