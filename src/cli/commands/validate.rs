//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Glossa configuration file.

use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Report Language: {}",
            config.application.language.display_name()
        );
        println!("  Analysis Service: {}", config.analysis.base_url);
        println!("  Model: {}", config.analysis.model);
        println!(
            "  API Key: {}",
            config
                .analysis
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().masked())
                .unwrap_or_else(|| "(not set, scans will fail)".to_string())
        );
        println!("  Timeout: {}s", config.analysis.timeout_seconds);
        println!("  Camera: {}", config.camera.facing);
        println!("  JPEG Quality: {}", config.camera.jpeg_quality);
        println!(
            "  History: {}/{}.json",
            config.history.data_dir.display(),
            config.history.storage_key
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
