//! Delete command implementation
//!
//! This module implements the `delete` command, which removes a stored
//! report and rewrites the persisted history.

use super::show::open_history;
use crate::config::load_config;
use crate::domain::EntryId;
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Identifier of the report to delete
    pub id: String,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(id = %self.id, "Deleting history entry");

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

        let mut history = open_history(&config.history);
        let existed = history.find_by_id(&id).is_some();

        match history.delete(&id) {
            Ok(remaining) if existed => {
                println!("🗑️  Deleted report {id}");
                println!("   {} report(s) remaining", remaining.len());
                Ok(0)
            }
            Ok(_) => {
                println!("⚠️  No report with id '{id}', nothing deleted");
                Ok(1)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete history entry");
                println!("❌ Failed to save history");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
