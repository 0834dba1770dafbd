//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do
//! not interfere with each other.

use glossa::config::load_config;
use glossa::domain::{FacingMode, Language};
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GLOSSA_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GLOSSA_APPLICATION_LANGUAGE");
    std::env::remove_var("GLOSSA_ANALYSIS_API_KEY");
    std::env::remove_var("GLOSSA_ANALYSIS_MODEL");
    std::env::remove_var("GLOSSA_CAMERA_FACING");
    std::env::remove_var("GLOSSA_CAMERA_JPEG_QUALITY");
    std::env::remove_var("GLOSSA_HISTORY_STORAGE_KEY");
    std::env::remove_var("TEST_GEMINI_KEY");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
language = "en"

[analysis]
base_url = "https://generativelanguage.example.com/"
model = "gemini-test"
api_key = "test-key-12345"
timeout_seconds = 20

[camera]
facing = "back"
jpeg_quality = 90
front_image = "captures/front.jpg"
back_image = "captures/back.jpg"

[history]
data_dir = "/tmp/glossa-data"
storage_key = "scans"

[logging]
local_enabled = true
local_path = "/tmp/glossa-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.language, Language::En);
    assert_eq!(config.analysis.model, "gemini-test");
    assert_eq!(config.analysis.timeout_seconds, 20);
    assert_eq!(
        config
            .analysis
            .api_key
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "test-key-12345"
    );
    assert_eq!(config.camera.facing, FacingMode::Back);
    assert_eq!(config.camera.jpeg_quality, 90);
    assert_eq!(
        config.camera.back_image,
        Some(PathBuf::from("captures/back.jpg"))
    );
    assert_eq!(config.history.storage_key, "scans");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.application.language, Language::Hi);
    assert_eq!(config.analysis.model, "gemini-3-flash-preview");
    assert!(config.analysis.api_key.is_none());
    assert_eq!(config.camera.facing, FacingMode::Front);
    assert_eq!(config.camera.jpeg_quality, 80);
    assert_eq!(config.history.storage_key, "tongue_health_pro_v3");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_GEMINI_KEY", "substituted-key");

    let temp_file = write_config(
        r#"
[analysis]
api_key = "${TEST_GEMINI_KEY}"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(
        config
            .analysis
            .api_key
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "substituted-key"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_var_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[analysis]
api_key = "${TEST_GEMINI_KEY}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_GEMINI_KEY"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GLOSSA_APPLICATION_LANGUAGE", "english");
    std::env::set_var("GLOSSA_ANALYSIS_API_KEY", "env-key");
    std::env::set_var("GLOSSA_CAMERA_FACING", "environment");
    std::env::set_var("GLOSSA_CAMERA_JPEG_QUALITY", "55");
    std::env::set_var("GLOSSA_HISTORY_STORAGE_KEY", "override_key");

    let temp_file = write_config(
        r#"
[application]
language = "hi"

[camera]
facing = "front"
jpeg_quality = 80
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(config.application.language, Language::En);
    assert_eq!(config.camera.facing, FacingMode::Back);
    assert_eq!(config.camera.jpeg_quality, 55);
    assert_eq!(config.history.storage_key, "override_key");
    assert!(config.analysis.api_key.is_some());
}

#[test]
fn test_invalid_env_override_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GLOSSA_CAMERA_FACING", "sideways");

    let temp_file = write_config("");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"loud\"",
        "[analysis]\nbase_url = \"not a url\"",
        "[analysis]\ntimeout_seconds = 0",
        "[camera]\njpeg_quality = 101",
        "[history]\nstorage_key = \"../escape\"",
        "[logging]\nlocal_rotation = \"weekly\"",
        "[application]\nlanguage = \"fr\"",
    ];

    for content in cases {
        let temp_file = write_config(content);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection for: {content}"
        );
    }
}
