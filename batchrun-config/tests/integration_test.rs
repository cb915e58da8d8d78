//! Integration tests for batchrun-config

use batchrun_config::*;
use batchrun_config::domains::logging::{LogFormat, LogLevel};
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = BatchRunConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("BATCHRUN_THREADS", Some("3")),
        ("BATCHRUN_SHUTDOWN_GRACE_SECONDS", Some("5")),
        ("BATCHRUN_BASE_DIRECTORY", Some("/tmp/experiments")),
        ("BATCHRUN_USE_CONFIG_FILES", Some("true")),
        ("BATCHRUN_LOG_LEVEL", Some("debug")),
        ("BATCHRUN_LOG_FORMAT", Some("json")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.execution.threads, 3);
        assert_eq!(config.execution.shutdown_grace_period, Duration::from_secs(5));
        assert_eq!(config.experiment.base_directory, PathBuf::from("/tmp/experiments"));
        assert!(config.experiment.use_algorithm_config_files);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("BATCHRUN_THREADS", Some("many"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });
}

#[test]
fn test_negative_threads_from_env_fail_validation() {
    with_vars(vec![("BATCHRUN_THREADS", Some("-1"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { .. }));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("EXP_THREADS", Some("7"))], || {
        let config = ConfigLoader::with_prefix("EXP").from_env().unwrap();
        assert_eq!(config.execution.threads, 7);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let config = BatchRunConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();

    // Parse it back
    let parsed: BatchRunConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.execution.shutdown_grace_period, config.execution.shutdown_grace_period);
}

#[test]
fn test_comprehensive_config() {
    let yaml = r#"
execution:
  threads: 8
  shutdown_grace_period: 12

experiment:
  base_directory: "/data/runs"
  pareto_front_file_name: "FUN"
  pareto_set_file_name: "VAR"
  use_algorithm_config_files: true
  algorithm_config_directory: "/data/conf"

logging:
  level: warn
  format: compact
  include_location: true
"#;

    let config: BatchRunConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(config.validate_all().is_ok());

    assert_eq!(config.execution.threads, 8);
    assert_eq!(config.execution.shutdown_grace_period, Duration::from_secs(12));
    assert_eq!(config.experiment.base_directory, PathBuf::from("/data/runs"));
    assert_eq!(config.experiment.algorithm_config_directory, PathBuf::from("/data/conf"));
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.logging.format, LogFormat::Compact);
    assert!(config.logging.include_location);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: BatchRunConfig = serde_yaml::from_str("execution:\n  threads: 2\n").unwrap();
    assert_eq!(config.execution.threads, 2);
    assert_eq!(config.experiment.pareto_front_file_name, "FUN");
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batchrun.yaml");
    std::fs::write(&path, "execution:\n  threads: 5\n").unwrap();

    temp_env::with_var_unset("BATCHRUN_THREADS", || {
        let config = ConfigLoader::new().load(Some(&path)).unwrap();
        assert_eq!(config.execution.threads, 5);
    });
}

#[test]
fn test_missing_file_is_read_error() {
    let err = ConfigLoader::new()
        .from_file("/definitely/not/here/batchrun.yaml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}

#[test]
fn test_generate_sample_parses() {
    let sample = BatchRunConfig::generate_sample();
    assert!(sample.contains("threads"));
    let parsed: BatchRunConfig = serde_yaml::from_str(&sample).unwrap();
    assert!(parsed.validate_all().is_ok());
}
