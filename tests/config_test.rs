//! Integration tests for Settings loading
//!
//! These tests load explicit files on top of the compiled defaults, so a
//! global config on the machine running them does not interfere. The env
//! layer test only asserts on the variables it sets itself.

use std::env;
use std::fs;

use tempfile::TempDir;

use avltrace::application::ApplicationError;
use avltrace::config::Settings;

#[test]
fn given_partial_display_section_when_loading_then_other_fields_keep_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avltrace.toml");
    fs::write(
        &path,
        r#"
[display]
diagrams = false
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_file(&path).expect("load settings");

    // Assert
    assert!(!settings.display.diagrams);
    assert!(settings.display.show_height);
    assert!(settings.display.show_balance);
    assert_eq!(settings.log_capacity, 20);
}

#[test]
fn given_log_capacity_when_loading_then_overrides_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avltrace.toml");
    fs::write(&path, "log_capacity = 3\n").unwrap();

    let settings = Settings::load_file(&path).expect("load settings");

    assert_eq!(settings.log_capacity, 3);
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "log_capacity = [not valid").unwrap();

    let result = Settings::load_file(&path);

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_effective_settings_when_rendering_toml_then_sections_present() {
    let toml = Settings::default().to_toml().expect("serialize");
    assert!(toml.contains("log_capacity = 20"));
    assert!(toml.contains("[display]"));
}

#[test]
fn given_prefixed_env_vars_when_loading_then_they_override_defaults() {
    // Arrange
    env::set_var("AVLTRACE_DISPLAY__DIAGRAMS", "false");
    env::set_var("AVLTRACE_LOG_CAPACITY", "5");

    // Act
    let result = Settings::load(None);

    // Clean up
    env::remove_var("AVLTRACE_DISPLAY__DIAGRAMS");
    env::remove_var("AVLTRACE_LOG_CAPACITY");

    // Assert
    let settings = result.expect("load settings");
    assert!(!settings.display.diagrams);
    assert_eq!(settings.log_capacity, 5);
}
