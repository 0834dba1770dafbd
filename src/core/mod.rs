//! Core business logic for Glossa.
//!
//! # Modules
//!
//! - [`scan`] - Scan lifecycle state machine and controller
//! - [`history`] - Persistent, most-recent-first history of reports
//!
//! # Scan Workflow
//!
//! 1. **Start**: Request a camera stream (`HOME → SCANNING`)
//! 2. **Capture**: Encode one frame and release the camera (`SCANNING → ANALYZING`)
//! 3. **Analyze**: Send the frame to the vision service
//! 4. **Record**: Append the validated report to history and persist it (`ANALYZING → RESULT`)
//!
//! Any camera or service failure returns the controller to `HOME` with a
//! user-visible error and leaves history untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use glossa::adapters::camera::StillImageCamera;
//! use glossa::adapters::storage::FileStore;
//! use glossa::adapters::vision::GeminiAnalyzer;
//! use glossa::config::load_config;
//! use glossa::core::history::HistoryStore;
//! use glossa::core::scan::{ScanController, ScanSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("glossa.toml")?;
//!
//! let camera = Arc::new(StillImageCamera::from_config(&config.camera));
//! let analyzer = Arc::new(GeminiAnalyzer::new(&config.analysis)?);
//! let storage = Arc::new(FileStore::new(config.history.data_dir.clone()));
//! let history = HistoryStore::load(storage, config.history.storage_key.clone());
//!
//! let mut controller =
//!     ScanController::new(camera, analyzer, history, ScanSettings::from_config(&config));
//!
//! controller.start_scan().await?;
//! controller.capture_and_analyze().await?;
//!
//! if let Some(entry) = controller.displayed_entry() {
//!     println!("{}", entry.report().share_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod scan;
