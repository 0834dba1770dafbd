//! History command implementation
//!
//! This module implements the `history` command, which lists stored reports
//! most recent first.

use super::show::{open_history, status_icon};
use crate::config::load_config;
use chrono::Local;
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Show at most this many reports
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Listing history");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let history = open_history(&config.history);

        println!("📜 Scan History");
        println!();

        if history.is_empty() {
            println!("No reports yet.");
            println!("Run 'glossa scan' to analyze your first image.");
            return Ok(0);
        }

        let limit = self.limit.unwrap_or(usize::MAX);
        for entry in history.entries().iter().take(limit) {
            let report = entry.report();
            println!(
                "{} {:<9} {:<12} {}  {}",
                status_icon(report.health_status()),
                report.health_status().as_str(),
                report.hemoglobin_estimate(),
                report
                    .timestamp()
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M"),
                entry.id()
            );
        }

        if history.len() > limit {
            println!("... and {} more", history.len() - limit);
        }

        println!();
        println!("Total: {}", history.len());
        Ok(0)
    }
}
