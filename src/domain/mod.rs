//! Domain models and types for Glossa.
//!
//! This module contains the core domain models, types, and business rules for Glossa.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`EntryId`])
//! - **Domain models** ([`HealthReport`], [`HistoryEntry`], [`HealthStatus`])
//! - **Scan preferences** ([`Language`], [`FacingMode`])
//! - **Error types** ([`GlossaError`], [`DeviceError`], [`ServiceError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Validation
//!
//! Reports arriving from the vision service are not trusted. They are checked
//! against the closed field set before a [`HealthReport`] exists:
//!
//! ```rust
//! use glossa::domain::{HealthReport, ServiceError};
//! use chrono::Utc;
//! use serde_json::json;
//!
//! let payload = json!({"hemoglobinEstimate": "12 g/dL", "healthStatus": "Unknown"});
//! let err = HealthReport::from_service_value(&payload, Utc::now()).unwrap_err();
//! assert!(matches!(err, ServiceError::MissingFields(_)));
//! ```

pub mod errors;
pub mod ids;
pub mod preferences;
pub mod report;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DeviceError, GlossaError, ServiceError, StoreError};
pub use ids::EntryId;
pub use preferences::{FacingMode, Language};
pub use report::{HealthReport, HealthReportBuilder, HealthStatus, HistoryEntry};
pub use result::Result;
