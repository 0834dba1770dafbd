//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GlossaConfig;
use crate::config::secret_string;
use crate::domain::errors::GlossaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GlossaConfig
/// 4. Applies environment variable overrides (GLOSSA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use glossa::config::loader::load_config;
///
/// let config = load_config("glossa.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GlossaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GlossaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GlossaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GlossaConfig = toml::from_str(&contents)
        .map_err(|e| GlossaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GlossaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GlossaError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(GlossaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using GLOSSA_* prefix
///
/// Environment variables follow the pattern: GLOSSA_<SECTION>_<KEY>
/// For example: GLOSSA_ANALYSIS_API_KEY, GLOSSA_CAMERA_FACING
fn apply_env_overrides(config: &mut GlossaConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GLOSSA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("GLOSSA_APPLICATION_LANGUAGE") {
        config.application.language = val.parse().map_err(GlossaError::Configuration)?;
    }

    // Analysis overrides
    if let Ok(val) = std::env::var("GLOSSA_ANALYSIS_BASE_URL") {
        config.analysis.base_url = val;
    }
    if let Ok(val) = std::env::var("GLOSSA_ANALYSIS_MODEL") {
        config.analysis.model = val;
    }
    if let Ok(val) = std::env::var("GLOSSA_ANALYSIS_API_KEY") {
        config.analysis.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("GLOSSA_ANALYSIS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.analysis.timeout_seconds = timeout;
        }
    }

    // Camera overrides
    if let Ok(val) = std::env::var("GLOSSA_CAMERA_FACING") {
        config.camera.facing = val.parse().map_err(GlossaError::Configuration)?;
    }
    if let Ok(val) = std::env::var("GLOSSA_CAMERA_JPEG_QUALITY") {
        if let Ok(quality) = val.parse() {
            config.camera.jpeg_quality = quality;
        }
    }

    // History overrides
    if let Ok(val) = std::env::var("GLOSSA_HISTORY_DATA_DIR") {
        config.history.data_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("GLOSSA_HISTORY_STORAGE_KEY") {
        config.history.storage_key = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GLOSSA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GLOSSA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GLOSSA_LOADER_TEST_VAR", "test_value");
        let input = "api_key = \"${GLOSSA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"");
        std::env::remove_var("GLOSSA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GLOSSA_LOADER_MISSING_VAR");
        let input = "api_key = \"${GLOSSA_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("GLOSSA_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("GLOSSA_LOADER_COMMENTED_VAR");
        let input = "# api_key = \"${GLOSSA_LOADER_COMMENTED_VAR}\"\nmodel = \"m\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(GlossaError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"
language = "en"

[analysis]
model = "gemini-3-flash-preview"
api_key = "test-key"

[camera]
facing = "back"
jpeg_quality = 70

[history]
data_dir = "/tmp/glossa-test"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.camera.jpeg_quality, 70);
        assert_eq!(config.history.data_dir, PathBuf::from("/tmp/glossa-test"));
    }
}
