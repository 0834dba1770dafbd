//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "glossa.toml")]
    pub output: String,

    /// Include explanatory comments for every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Glossa configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [camera] front_image/back_image at JPEG captures");
                println!("  3. Provide your API key, e.g. in a .env file:");
                println!("     GLOSSA_ANALYSIS_API_KEY=...");
                println!("  4. Validate configuration: glossa validate-config");
                println!("  5. Run a scan: glossa scan");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Glossa Configuration File

[application]
log_level = "info"
language = "hi"

[analysis]
model = "gemini-3-flash-preview"
timeout_seconds = 60
# api_key = "${GEMINI_API_KEY}"

[camera]
facing = "front"
jpeg_quality = 80
# front_image = "captures/front.jpg"
# back_image = "captures/back.jpg"

[history]
data_dir = ".glossa"
storage_key = "tongue_health_pro_v3"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Glossa Configuration File
#
# Every setting can also be overridden with an environment variable named
# GLOSSA_<SECTION>_<KEY>, for example GLOSSA_ANALYSIS_API_KEY.
# Values may reference environment variables with ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Language the report is written in: "hi" (Hindi) or "en" (English)
language = "hi"

# ============================================================================
# Analysis Service
# ============================================================================
[analysis]
# Base URL of the generative language API
base_url = "https://generativelanguage.googleapis.com"

# Vision model used for the tongue analysis
model = "gemini-3-flash-preview"

# API key (prefer the GLOSSA_ANALYSIS_API_KEY environment variable)
# api_key = "${GEMINI_API_KEY}"

# Request timeout in seconds. A timed-out request fails the scan; it is
# never retried automatically.
timeout_seconds = 60

# ============================================================================
# Camera
# ============================================================================
[camera]
# Camera used when a scan starts: "front" or "back"
facing = "front"

# JPEG quality of the captured frame (1-100)
jpeg_quality = 80

# JPEG files standing in for each camera
# front_image = "captures/front.jpg"
# back_image = "captures/back.jpg"

# ============================================================================
# History
# ============================================================================
[history]
# Directory the history file lives in
data_dir = ".glossa"

# Name of the history file (without .json). Changing it starts a new history.
storage_key = "tongue_health_pro_v3"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Also write JSON logs to files
local_enabled = false

# Log directory
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
