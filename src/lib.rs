// Glossa - Tongue-scan health estimates from a remote AI vision service
// Copyright (c) 2025 Glossa Contributors
// Licensed under the MIT License

//! # Glossa - Tongue-scan health estimates
//!
//! Glossa photographs the user's tongue, sends the image to a remote AI vision
//! service for a structured health estimate, displays the result, and keeps a
//! local history of past scans.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Driving** the scan lifecycle (`HOME → SCANNING → ANALYZING → RESULT`)
//! - **Capturing** a frame from a camera and releasing it on every exit
//! - **Analyzing** the frame with a remote model and validating the report
//! - **Persisting** a most-recent-first history of reports
//!
//! Image analysis is entirely delegated to the external model.
//!
//! ## Architecture
//!
//! Glossa follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (scan controller, history store)
//! - [`adapters`] - External integrations (camera, vision service, storage)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glossa::adapters::camera::StillImageCamera;
//! use glossa::adapters::storage::FileStore;
//! use glossa::adapters::vision::GeminiAnalyzer;
//! use glossa::config::load_config;
//! use glossa::core::history::HistoryStore;
//! use glossa::core::scan::{Completion, ScanController, ScanSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("glossa.toml")?;
//!
//!     let history = HistoryStore::load(
//!         Arc::new(FileStore::new(config.history.data_dir.clone())),
//!         config.history.storage_key.clone(),
//!     );
//!     let mut controller = ScanController::new(
//!         Arc::new(StillImageCamera::from_config(&config.camera)),
//!         Arc::new(GeminiAnalyzer::new(&config.analysis)?),
//!         history,
//!         ScanSettings::from_config(&config),
//!     );
//!
//!     controller.start_scan().await?;
//!     if controller.capture_and_analyze().await? == Completion::Applied {
//!         println!("Saved {} reports", controller.history().len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Stale Responses
//!
//! Camera acquisition and analysis are split into a request and a completion.
//! Requests carry a generation number; a completion for an older generation
//! is discarded, and a stale camera stream is stopped on arrival:
//!
//! ```rust,no_run
//! # use glossa::core::scan::{Completion, ScanController};
//! # async fn example(controller: &mut ScanController) -> glossa::domain::Result<()> {
//! let request = controller.begin_scan()?;
//! let stream = controller.camera().acquire_stream(request.facing()).await;
//!
//! match controller.complete_scan_start(request.generation(), stream) {
//!     Completion::Applied => println!("camera ready"),
//!     Completion::Failed => println!("{}", controller.last_error().unwrap_or_default()),
//!     Completion::Stale => println!("superseded"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Glossa uses the [`domain::GlossaError`] type for all errors. Camera,
//! service and store failures are recoverable: the controller returns to a
//! stable screen and records a user-visible message.
//!
//! ```rust,no_run
//! use glossa::domain::GlossaError;
//!
//! fn example() -> Result<(), GlossaError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = glossa::config::load_config("glossa.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Glossa uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting scan");
//! warn!(state = "SCANNING", "Camera unavailable");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
