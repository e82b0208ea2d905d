use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::Serialize;
use testgate_graph::{LocalMatch, MatchPolicy};

use crate::cli::Cli;
use crate::config::{ENV_PREFIX, TestgateConfig};
use crate::error::{ConfigError, Result};

/// Values given on the command line. Absent flags are not serialized, so
/// they never mask an environment variable.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    test_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_folder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison_branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    match_policy: Option<MatchPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_match: Option<LocalMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    json: Option<bool>,
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            test_dir: args.test_dir.clone(),
            base_folder_name: args.base_folder_name.clone(),
            comparison_branch_name: args.comparison_branch_name.clone(),
            match_policy: args.match_policy.map(Into::into),
            local_match: args.local_match.map(Into::into),
            max_depth: args.max_depth,
            diff_timeout: args.diff_timeout,
            source_pattern: args.source_pattern.clone(),
            test_pattern: args.test_pattern.clone(),
            repo_dir: args.repo_dir.clone(),
            json: args.json.then_some(true),
        }
    }
}

impl TestgateConfig {
    /// Load configuration from defaults, environment and CLI flags.
    /// Priority: CLI args > environment variables > defaults
    pub fn load(args: &Cli) -> Result<Self> {
        Self::extract(Self::layered(args, true))
    }

    /// Defaults and CLI flags only, ignoring the environment.
    #[cfg(test)]
    pub(crate) fn load_without_env(args: &Cli) -> Result<Self> {
        Self::extract(Self::layered(args, false))
    }

    fn layered(args: &Cli, with_env: bool) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        // TESTGATE_TEST_DIR, TESTGATE_MATCH_POLICY, ...
        if with_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX));
        }

        figment.merge(Serialized::defaults(CliOverrides::from(args)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: e
                    .path
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "configuration".to_string()),
                value: e.kind.to_string(),
                hint: format!("Check the command-line flags and {ENV_PREFIX}* environment variables"),
            }
            .into()
        })
    }
}
