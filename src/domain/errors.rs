//! Domain error types
//!
//! This module defines the error hierarchy for Glossa.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Glossa error type
///
/// This is the primary error type used throughout the application.
/// It wraps the collaborator-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum GlossaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Camera-related errors
    #[error("Camera error: {0}")]
    Device(#[from] DeviceError),

    /// Vision service errors
    #[error("Analysis service error: {0}")]
    Service(#[from] ServiceError),

    /// History persistence errors
    #[error("History store error: {0}")]
    Store(#[from] StoreError),

    /// Action not permitted in the current scan state
    #[error("Invalid transition: cannot {action} while in {state}")]
    InvalidTransition {
        /// Name of the state the controller was in
        state: &'static str,
        /// Name of the rejected action
        action: &'static str,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Camera errors
///
/// Raised when a video stream cannot be acquired or a frame cannot be captured.
/// Always recovered locally: the user stays on (or returns to) the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The user or platform refused camera access
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    /// No camera is available for the requested facing mode
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    /// Capture was requested without an active stream
    #[error("No active video stream")]
    NoActiveStream,

    /// The current frame could not be encoded
    #[error("Frame capture failed: {0}")]
    CaptureFailed(String),
}

/// Vision service errors
///
/// Covers transport failures and any response that does not validate
/// as a complete health report. A failed analysis never produces a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Failed to reach the service
    #[error("Failed to connect to analysis service: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The service answered without any report text
    #[error("AI could not generate a report")]
    EmptyResponse,

    /// Response body or report text is not valid JSON of the expected shape
    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),

    /// Required report fields are absent
    #[error("Report is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// `healthStatus` outside the enumerated set
    #[error("Unknown health status: {0}")]
    UnknownHealthStatus(String),
}

/// History persistence errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Persisted history could not be decoded
    #[error("Persisted history is corrupt: {0}")]
    Corruption(String),

    /// Reading the persisted value failed
    #[error("Failed to read key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing the persisted value failed
    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

impl GlossaError {
    /// Whether the error is a recoverable collaborator failure
    ///
    /// Device, service and store failures return the user to a stable screen;
    /// everything else indicates a programming or configuration problem.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GlossaError::Device(_) | GlossaError::Service(_) | GlossaError::Store(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GlossaError {
    fn from(err: std::io::Error) -> Self {
        GlossaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GlossaError {
    fn from(err: serde_json::Error) -> Self {
        GlossaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GlossaError {
    fn from(err: toml::de::Error) -> Self {
        GlossaError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glossa_error_display() {
        let err = GlossaError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_device_error_conversion() {
        let device_err = DeviceError::PermissionDenied("user refused".to_string());
        let err: GlossaError = device_err.into();
        assert!(matches!(err, GlossaError::Device(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_service_error_conversion() {
        let service_err = ServiceError::EmptyResponse;
        let err: GlossaError = service_err.into();
        assert!(matches!(err, GlossaError::Service(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_fields_display() {
        let err = ServiceError::MissingFields(vec![
            "healthStatus".to_string(),
            "description".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Report is missing required fields: healthStatus, description"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = GlossaError::InvalidTransition {
            state: "HOME",
            action: "capture",
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: cannot capture while in HOME"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GlossaError = io_err.into();
        assert!(matches!(err, GlossaError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GlossaError = json_err.into();
        assert!(matches!(err, GlossaError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GlossaError = toml_err.into();
        assert!(matches!(err, GlossaError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_store_error_implements_std_error() {
        let err = StoreError::Corruption("bad json".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
