//! Configuration loading from files

mod common;

use common::pyramidal_data;
use morpho_sdk::{ExtractionConfig, FailurePolicy, FeatureExtractionEngine, SdkError};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_yaml_file() {
    let file = write_config(
        r#"
feature_set: topology
only_marks:
  - Intrinsic
  - AllNeuriteTypes
failure_policy: continue
log_level: debug
"#,
    );

    let config = ExtractionConfig::load_from(file.path()).unwrap();
    assert_eq!(config.feature_set, "topology");
    assert_eq!(
        config.only_marks,
        Some(vec!["Intrinsic".to_string(), "AllNeuriteTypes".to_string()])
    );
    assert_eq!(config.failure_policy, FailurePolicy::Continue);
    assert_eq!(config.log_level, "debug");
    assert!(config.required_marks.is_empty());

    let engine = FeatureExtractionEngine::from_config(config).unwrap();
    let result = engine.extract(&pyramidal_data()).unwrap();
    assert_eq!(
        result.feature_names(),
        vec![
            "node_type_counts",
            "all_neurites.num_nodes",
            "all_neurites.num_bifurcations",
            "all_neurites.num_tips"
        ]
    );
}

#[test]
fn test_load_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExtractionConfig::load_from(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SdkError::ConfigError(_)));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_unknown_feature_set_in_file() {
    let file = write_config("feature_set: aibs_default\n");

    let config = ExtractionConfig::load_from(file.path()).unwrap();
    let err = FeatureExtractionEngine::from_config(config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown feature set 'aibs_default'. Known feature sets: default, topology"
    );
}

#[test]
fn test_unknown_mark_in_file() {
    let file = write_config("required_marks: [RequiresSoma, RequiresTail]\n");

    let config = ExtractionConfig::load_from(file.path()).unwrap();
    let err = FeatureExtractionEngine::from_config(config).unwrap_err();
    assert!(err.to_string().contains("RequiresTail"));
}

fn write_project_config(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config").join("morpho.yaml"), contents).unwrap();
    dir
}

#[test]
fn test_load_in_reads_project_config() {
    let dir = write_project_config("feature_set: topology\nrequired_marks: [RequiresSoma]\n");

    let config = ExtractionConfig::load_in(dir.path()).unwrap();
    assert_eq!(config.feature_set, "topology");
    assert_eq!(config.required_marks, vec!["RequiresSoma".to_string()]);
}

#[test]
fn test_load_in_without_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = ExtractionConfig::load_in(dir.path()).unwrap();
    assert_eq!(config, ExtractionConfig::default());
}

#[test]
fn test_load_in_malformed_config_is_an_error() {
    let dir = write_project_config(
        "required_marks: [RequiresApical]\nfeature_set: topology\n\t bad: [\n",
    );

    let err = ExtractionConfig::load_in(dir.path()).unwrap_err();
    assert!(matches!(err, SdkError::ConfigError(_)));
}

#[test]
fn test_configured_log_level_initializes_tracing() {
    let dir = write_project_config("log_level: debug\n");

    let config = ExtractionConfig::load_in(dir.path()).unwrap();
    assert_eq!(config.log_level, "debug");
    morpho_sdk::logging::init_tracing(&config.log_level).unwrap();
}
