//! Camera trait definition
//!
//! The camera is an exclusively owned resource: the scan controller holds at
//! most one [`VideoStream`] and must hand it back through
//! [`Camera::stop_stream`] on every path out of scanning.

use crate::domain::{DeviceError, FacingMode};
use async_trait::async_trait;

/// Handle to an acquired video stream
///
/// A handle starts active and becomes inactive once stopped. Stopping is
/// idempotent.
#[derive(Debug, PartialEq, Eq)]
pub struct VideoStream {
    id: u64,
    facing: FacingMode,
    active: bool,
}

impl VideoStream {
    /// Create an active stream handle
    pub fn new(id: u64, facing: FacingMode) -> Self {
        Self {
            id,
            facing,
            active: true,
        }
    }

    /// Backend-assigned stream identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Camera the stream was opened on
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Whether the stream is still delivering frames
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the handle stopped
    ///
    /// # Returns
    ///
    /// `true` if this call stopped the stream, `false` if it was already stopped.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// Device camera capability
#[async_trait]
pub trait Camera: Send + Sync {
    /// Open a video stream on the requested camera
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::PermissionDenied`] or [`DeviceError::Unavailable`].
    async fn acquire_stream(&self, facing: FacingMode) -> Result<VideoStream, DeviceError>;

    /// Release a stream. Idempotent and infallible.
    fn stop_stream(&self, stream: &mut VideoStream);

    /// Capture the current frame as a lossy-compressed image
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NoActiveStream`] for a stopped stream, or
    /// [`DeviceError::CaptureFailed`] if the frame cannot be encoded.
    async fn encode_frame(&self, stream: &VideoStream, quality: u8)
        -> Result<Vec<u8>, DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_stop_is_idempotent() {
        let mut stream = VideoStream::new(7, FacingMode::Back);
        assert!(stream.is_active());
        assert!(stream.stop());
        assert!(!stream.stop());
        assert!(!stream.is_active());
        assert_eq!(stream.id(), 7);
        assert_eq!(stream.facing(), FacingMode::Back);
    }
}
