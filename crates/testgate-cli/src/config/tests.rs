#[cfg(test)]
mod tests {
    use crate::cli::{Cli, LocalMatchArg, MatchPolicyArg};
    use crate::config::TestgateConfig;
    use crate::error::{CliError, ConfigError};
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use testgate_graph::{DEFAULT_MAX_DEPTH, LocalMatch, MatchPolicy};

    fn full_cli() -> Cli {
        Cli {
            test_dir: Some(PathBuf::from("tests")),
            base_folder_name: Some("proj".to_string()),
            comparison_branch_name: Some("origin/main".to_string()),
            ..Cli::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = TestgateConfig::load_without_env(&Cli::default()).unwrap();
        assert_eq!(config, TestgateConfig::default_config());
        assert_eq!(config.match_policy, MatchPolicy::Containment);
        assert_eq!(config.local_match, LocalMatch::Segment);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.diff_timeout, 30);
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Cli {
            match_policy: Some(MatchPolicyArg::Exact),
            local_match: Some(LocalMatchArg::Containment),
            max_depth: Some(7),
            diff_timeout: Some(3),
            json: true,
            ..full_cli()
        };
        let config = TestgateConfig::load_without_env(&args).unwrap();

        assert_eq!(config.match_policy, MatchPolicy::Exact);
        assert_eq!(config.local_match, LocalMatch::Containment);
        assert_eq!(config.max_depth, 7);
        assert_eq!(config.diff_timeout, 3);
        assert!(config.json);
        assert_eq!(config.base_folder_name.as_deref(), Some("proj"));
    }

    #[test]
    fn test_absent_flags_are_not_serialized() {
        let config = TestgateConfig::default_config();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("test_dir").is_none());
        assert!(json.get("repo_dir").is_none());
        assert_eq!(json["match_policy"], "containment");
    }

    #[test]
    fn test_settings_resolve_relative_paths() {
        let config = TestgateConfig {
            repo_dir: Some(PathBuf::from("..")),
            ..TestgateConfig::load_without_env(&full_cli()).unwrap()
        };
        let settings = config.into_settings(Path::new("/work/src/proj")).unwrap();

        assert_eq!(settings.test_dir, PathBuf::from("/work/src/proj/tests"));
        assert_eq!(settings.repo_dir, Some(PathBuf::from("/work/src/proj/..")));
        assert_eq!(settings.root.as_str(), "proj");
        assert_eq!(settings.base_revision, "origin/main");
        assert_eq!(settings.diff_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_settings_keep_absolute_test_dir() {
        let config = TestgateConfig {
            test_dir: Some(PathBuf::from("/abs/proj/tests")),
            ..TestgateConfig::load_without_env(&full_cli()).unwrap()
        };
        let settings = config.into_settings(Path::new("/elsewhere")).unwrap();
        assert_eq!(settings.test_dir, PathBuf::from("/abs/proj/tests"));
    }

    #[test]
    fn test_missing_required_options() {
        for field in ["test_dir", "base_folder_name", "comparison_branch_name"] {
            let mut config = TestgateConfig::load_without_env(&full_cli()).unwrap();
            match field {
                "test_dir" => config.test_dir = None,
                "base_folder_name" => config.base_folder_name = None,
                _ => config.comparison_branch_name = Some("  ".to_string()),
            }

            let err = config.into_settings(Path::new("/")).unwrap_err();
            match err {
                CliError::Config(ConfigError::MissingField { field: missing, .. }) => {
                    assert_eq!(missing, field)
                }
                other => panic!("unexpected error for {field}: {other}"),
            }
        }
    }

    #[test]
    fn test_invalid_base_folder_from_environment_is_rejected() {
        let config = TestgateConfig {
            base_folder_name: Some("a/b".to_string()),
            ..TestgateConfig::load_without_env(&full_cli()).unwrap()
        };
        let err = config.into_settings(Path::new("/")).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidRoot(_))));
    }

    #[test]
    fn test_file_patterns_select_files() {
        let args = Cli {
            source_pattern: Some(r"\.gox?$".to_string()),
            test_pattern: Some(r"_spec\.gox?$".to_string()),
            ..full_cli()
        };
        let settings = TestgateConfig::load_without_env(&args)
            .unwrap()
            .into_settings(Path::new("/"))
            .unwrap();

        assert!(settings.conventions.retains("api_spec.gox", true));
        assert!(!settings.conventions.retains("api_test.go", true));
        assert!(settings.conventions.retains("api.go", false));
    }

    #[test]
    fn test_default_patterns_are_go() {
        let settings = TestgateConfig::load_without_env(&full_cli())
            .unwrap()
            .into_settings(Path::new("/"))
            .unwrap();
        assert!(settings.conventions.retains("api_test.go", true));
        assert!(!settings.conventions.retains("api.go", true));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = TestgateConfig {
            test_pattern: "([".to_string(),
            ..TestgateConfig::load_without_env(&full_cli()).unwrap()
        };
        let err = config.into_settings(Path::new("/")).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Pattern(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = TestgateConfig {
            diff_timeout: 0,
            ..TestgateConfig::load_without_env(&full_cli()).unwrap()
        };
        assert!(config.into_settings(Path::new("/")).is_err());
    }
}
