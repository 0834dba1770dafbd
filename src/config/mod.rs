//! Configuration management for Glossa.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Glossa uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GLOSSA_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and report language
//! - [`AnalysisConfig`] - Vision service endpoint, model, API key and timeout
//! - [`CameraConfig`] - Facing mode, encoding quality and capture sources
//! - [`HistoryConfig`] - Where scan history is persisted
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! language = "hi"
//!
//! [analysis]
//! model = "gemini-3-flash-preview"
//! api_key = "${GLOSSA_API_KEY}"
//!
//! [camera]
//! facing = "front"
//! front_image = "captures/tongue.jpg"
//!
//! [history]
//! data_dir = ".glossa"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use glossa::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("glossa.toml")?;
//! println!("Model: {}", config.analysis.model);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AnalysisConfig, ApplicationConfig, CameraConfig, GlossaConfig, HistoryConfig, LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
