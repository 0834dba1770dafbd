//! Show command implementation
//!
//! This module implements the `show` command, which displays a stored
//! report in full or as the plain-text share summary.

use crate::adapters::storage::FileStore;
use crate::config::{load_config, HistoryConfig};
use crate::core::history::HistoryStore;
use crate::domain::{EntryId, HealthStatus, HistoryEntry};
use chrono::Local;
use clap::Args;
use std::sync::Arc;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Identifier of the report (see `glossa history`)
    pub id: String,

    /// Print only the shareable text summary
    #[arg(long)]
    pub share: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(id = %self.id, "Showing history entry");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let id = match EntryId::new(self.id.clone()) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(1);
            }
        };

        let history = open_history(&config.history);
        match history.find_by_id(&id) {
            Some(entry) if self.share => {
                println!("{}", entry.report().share_text());
                Ok(0)
            }
            Some(entry) => {
                print_entry(entry);
                Ok(0)
            }
            None => {
                println!("❌ No report with id '{id}'");
                println!("   Run 'glossa history' to list stored reports.");
                Ok(1)
            }
        }
    }
}

/// Open the file-backed history described by `config`
pub(crate) fn open_history(config: &HistoryConfig) -> HistoryStore {
    let storage = Arc::new(FileStore::new(config.data_dir.clone()));
    HistoryStore::load(storage, config.storage_key.clone())
}

/// Status marker shown next to a report
pub(crate) fn status_icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent | HealthStatus::Good => "🟢",
        HealthStatus::Fair => "🟡",
        HealthStatus::Poor => "🔴",
    }
}

/// Print a full report
pub(crate) fn print_entry(entry: &HistoryEntry) {
    let report = entry.report();

    println!("🩺 Tongue Analysis Report");
    println!("  ID: {}", entry.id());
    println!(
        "  Date: {}",
        report
            .timestamp()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!(
        "  Status: {} {}",
        status_icon(report.health_status()),
        report.health_status()
    );
    println!("  Est. Hb: {}", report.hemoglobin_estimate());
    println!();
    println!("  {}", report.description());
    println!();

    println!("🔍 Observations:");
    if report.observations().is_empty() {
        println!("  (none)");
    }
    for observation in report.observations() {
        println!("  - {observation}");
    }
    println!();

    println!("💡 Recommendations:");
    if report.recommendations().is_empty() {
        println!("  (none)");
    }
    for recommendation in report.recommendations() {
        println!("  - {recommendation}");
    }
    println!();
    println!("⚠️  AI estimate only. Consult a doctor for medical advice.");
}
