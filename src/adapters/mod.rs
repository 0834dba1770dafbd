//! External system integrations for Glossa.
//!
//! This module provides adapters for the collaborators the scan flow depends on:
//!
//! - [`camera`] - Video stream acquisition and frame capture
//! - [`vision`] - Remote AI vision service (Gemini)
//! - [`storage`] - Durable key-value storage for scan history
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. Each collaborator is a trait
//! ([`camera::Camera`], [`vision::VisionAnalyzer`], [`storage::KeyValueStore`])
//! so the scan controller never sees a concrete device, service, or disk.
//!
//! # Vision Adapter
//!
//! ```rust,no_run
//! use glossa::adapters::vision::{GeminiAnalyzer, VisionAnalyzer};
//! use glossa::config::{secret_string, AnalysisConfig};
//! use glossa::domain::Language;
//!
//! # async fn example(jpeg: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalysisConfig {
//!     api_key: Some(secret_string("api-key".to_string())),
//!     ..Default::default()
//! };
//!
//! let analyzer = GeminiAnalyzer::new(&config)?;
//! let report = analyzer.analyze(&jpeg, Language::Hi).await?;
//! println!("Hb: {}", report.hemoglobin_estimate());
//! # Ok(())
//! # }
//! ```
//!
//! # Storage Adapter
//!
//! ```rust
//! use glossa::adapters::storage::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.write("history", b"[]").unwrap();
//! assert_eq!(store.read("history").unwrap(), Some(b"[]".to_vec()));
//! ```

pub mod camera;
pub mod storage;
pub mod vision;
