//! Integration tests for configuration loading.
//!
//! Exercises file loading, env overrides, and validation with real TOML
//! files on disk.

use std::fs;

use tempfile::TempDir;

use tagsentry_core::config::TagsentryConfig;

#[test]
fn load_valid_config_file() {
    // Given: a valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("tagsentry.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[verify]
input_file = "test-export.json"
artifact_path = "dist/js/index.js"
artifact_min_bytes = 524288

[report]
format = "json"
output_path = "results.json"
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: loading the config
    let config = TagsentryConfig::from_file(&config_path).expect("valid config should load");

    // Then: values come from the file
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.verify.input_file, "test-export.json");
    assert_eq!(config.verify.artifact_min_bytes, 524_288);
    assert_eq!(config.report.output_path, "results.json");
}

#[test]
fn load_missing_file_fails() {
    let result = TagsentryConfig::from_file("/nonexistent/tagsentry.toml");
    assert!(result.is_err(), "missing file should fail to load");
}

#[test]
fn load_malformed_toml_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"").expect("should write bad config");

    let result = TagsentryConfig::from_file(&config_path);
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[test]
fn load_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");

    fs::write(&config_path, "").expect("should write empty file");

    let config = TagsentryConfig::from_file(&config_path).expect("empty config should load");
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.report.format, "json", "report defaults to json fallback");
}

#[test]
fn load_invalid_value_fails_validation() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("invalid.toml");

    fs::write(&config_path, "[report]\nformat = \"pdf\"").expect("should write config");

    let result = TagsentryConfig::from_file(&config_path);
    assert!(result.is_err(), "unknown report format should fail validation");
}
