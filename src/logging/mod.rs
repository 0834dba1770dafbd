//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use glossa::logging::init_logging;
//! use glossa::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a scan state transition
///
/// # Example
///
/// ```no_run
/// use glossa::log_transition;
///
/// log_transition!("HOME", "SCANNING", 3);
/// ```
#[macro_export]
macro_rules! log_transition {
    ($from:expr, $to:expr, $generation:expr) => {
        tracing::info!(
            from = %$from,
            to = %$to,
            generation = $generation,
            "Scan state changed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use glossa::log_error_with_context;
/// use glossa::domain::GlossaError;
///
/// let error = GlossaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
