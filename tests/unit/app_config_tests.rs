/*!
 * Tests for application configuration functionality
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use citeclean::app_config::{Config, LogLevel};
use log::LevelFilter;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.output.suffix, "_cleaned");
    assert_eq!(config.output.output_dir, None);
    assert_eq!(config.highlight.class_name, "cite-highlight");
    assert_eq!(config.highlight.tooltip_prefix, "Citation marker");
    assert_eq!(config.preview.indent_width, 2);
    assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
    assert_eq!(config.server.output_dir, PathBuf::from("outputs"));
    assert_eq!(config.server.max_upload_bytes, 64 * 1024 * 1024);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.output.suffix = String::new();
    assert!(config.validate().is_err());
    config.output.suffix = "/../x".to_string();
    assert!(config.validate().is_err());
    config.output.suffix = "-clean".to_string();
    assert!(config.validate().is_ok());

    config.highlight.class_name = "1bad".to_string();
    assert!(config.validate().is_err());
    config.highlight.class_name = "has space".to_string();
    assert!(config.validate().is_err());
    config.highlight.class_name = "_cite-mark2".to_string();
    assert!(config.validate().is_ok());

    config.preview.indent_width = 17;
    assert!(config.validate().is_err());
    config.preview.indent_width = 0;
    assert!(config.validate().is_ok());

    config.server.port = 0;
    assert!(config.validate().is_err());
    config.server.port = 8080;
    config.server.host = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_highlight_style_withCustomSection_shouldCarryValues() {
    let mut config = Config::default();
    config.highlight.class_name = "marker".to_string();
    config.highlight.tooltip_prefix = "Cite".to_string();

    let style = config.highlight_style();

    assert_eq!(style.class_name, "marker");
    assert_eq!(style.tooltip("[cite: 1]"), "Cite: [cite: 1]");
}

#[test]
fn test_log_level_withEachVariant_shouldMapToFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.output.suffix, "_cleaned");
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written["server"]["port"], 8000);
    assert_eq!(written["log_level"], "info");

    Ok(())
}

/// Test that partial files fall back to defaults for missing sections
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "output": { "suffix": "_nocite" }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.output.suffix, "_nocite");
    assert_eq!(config.output.output_dir, None);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.highlight.class_name, "cite-highlight");

    Ok(())
}

#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    let err = Config::load_or_create(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to parse config file"));

    Ok(())
}
