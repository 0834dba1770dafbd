//! Configuration schema types
//!
//! This module defines the configuration structure for Glossa.

use crate::config::SecretString;
use crate::domain::{FacingMode, Language};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Glossa configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; omitted sections take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlossaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Vision service settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,

    /// Scan history persistence
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GlossaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.analysis.validate()?;
        self.camera.validate()?;
        self.history.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Language the report is requested in
    #[serde(default)]
    pub language: Language,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            language: Language::default(),
        }
    }
}

/// Vision service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_analysis_base_url")]
    pub base_url: String,

    /// Model used for tongue analysis
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the service
    ///
    /// Stored securely in memory and automatically zeroized on drop.
    /// Only required by commands that run an analysis.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds; an expired request counts as a transport failure
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("analysis.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("analysis.base_url must start with http:// or https://".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("analysis.model cannot be empty".to_string());
        }

        if let Some(ref key) = self.api_key {
            if key.expose_secret().is_empty() {
                return Err("analysis.api_key cannot be blank when provided".to_string());
            }
        }

        if self.timeout_seconds == 0 {
            return Err("analysis.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: default_analysis_base_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Camera configuration
///
/// The command-line front end captures from still images, one per facing mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Facing mode requested when a scan starts
    #[serde(default)]
    pub facing: FacingMode,

    /// Lossy encoding quality, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Image captured by the front camera
    #[serde(default)]
    pub front_image: Option<PathBuf>,

    /// Image captured by the back camera
    #[serde(default)]
    pub back_image: Option<PathBuf>,
}

impl CameraConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "camera.jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: FacingMode::default(),
            jpeg_quality: default_jpeg_quality(),
            front_image: None,
            back_image: None,
        }
    }
}

/// History persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding persisted keys
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the whole history is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl HistoryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("history.data_dir cannot be empty".to_string());
        }

        let valid_key = !self.storage_key.is_empty()
            && self
                .storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !self.storage_key.starts_with('.');
        if !valid_key {
            return Err(format!(
                "history.storage_key '{}' may only contain letters, digits, '_', '-' and '.'",
                self.storage_key
            ));
        }

        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_analysis_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_jpeg_quality() -> u8 {
    80
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".glossa")
}

fn default_storage_key() -> String {
    "tongue_health_pro_v3".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analysis_config_validation() {
        let mut config = AnalysisConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config = AnalysisConfig {
            api_key: Some(secret_string("  ".to_string())),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("api_key"));

        config = AnalysisConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_camera_config_validation() {
        let mut config = CameraConfig::default();
        assert!(config.validate().is_ok());

        config.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_history_config_validation() {
        let mut config = HistoryConfig::default();
        assert!(config.validate().is_ok());

        config.storage_key = "../escape".to_string();
        assert!(config.validate().is_err());

        config.storage_key = ".hidden".to_string();
        assert!(config.validate().is_err());

        config.storage_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let config = GlossaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.application.language, Language::Hi);
        assert_eq!(config.analysis.model, "gemini-3-flash-preview");
        assert_eq!(config.analysis.timeout_seconds, 60);
        assert_eq!(config.camera.facing, FacingMode::Front);
        assert_eq!(config.camera.jpeg_quality, 80);
        assert_eq!(config.history.storage_key, "tongue_health_pro_v3");
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: GlossaConfig = toml::from_str("").unwrap();
        assert_eq!(config.history.data_dir, PathBuf::from(".glossa"));
        assert!(config.analysis.api_key.is_none());
    }
}
