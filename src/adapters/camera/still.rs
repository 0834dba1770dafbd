//! Still-image camera
//!
//! Stands in for a live camera on machines without one: each facing mode is
//! backed by a JPEG file that is "captured" when a frame is requested. The
//! file is already lossy-compressed, so it is passed through as-is.

use super::traits::{Camera, VideoStream};
use crate::config::CameraConfig;
use crate::domain::{DeviceError, FacingMode};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Camera whose frames come from image files
#[derive(Debug, Default)]
pub struct StillImageCamera {
    front: Option<PathBuf>,
    back: Option<PathBuf>,
    next_stream_id: AtomicU64,
    active_streams: AtomicUsize,
}

impl StillImageCamera {
    /// Create a camera from explicit sources
    pub fn new(front: Option<PathBuf>, back: Option<PathBuf>) -> Self {
        Self {
            front,
            back,
            ..Default::default()
        }
    }

    /// Create a camera from the `[camera]` configuration section
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.front_image.clone(), config.back_image.clone())
    }

    /// Number of streams acquired and not yet stopped
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }

    fn source_for(&self, facing: FacingMode) -> Option<&Path> {
        match facing {
            FacingMode::Front => self.front.as_deref(),
            FacingMode::Back => self.back.as_deref(),
        }
    }
}

#[async_trait]
impl Camera for StillImageCamera {
    async fn acquire_stream(&self, facing: FacingMode) -> Result<VideoStream, DeviceError> {
        let source = self
            .source_for(facing)
            .ok_or_else(|| DeviceError::Unavailable(format!("no {facing} camera configured")))?;

        match tokio::fs::metadata(source).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(DeviceError::Unavailable(format!(
                    "{} is not a file",
                    source.display()
                )))
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(DeviceError::PermissionDenied(source.display().to_string()))
            }
            Err(e) => {
                return Err(DeviceError::Unavailable(format!(
                    "{}: {}",
                    source.display(),
                    e
                )))
            }
        }

        let id = self.next_stream_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.active_streams.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(stream_id = id, facing = %facing, source = %source.display(), "Camera stream opened");

        Ok(VideoStream::new(id, facing))
    }

    fn stop_stream(&self, stream: &mut VideoStream) {
        if stream.stop() {
            self.active_streams.fetch_sub(1, Ordering::SeqCst);
            tracing::debug!(stream_id = stream.id(), "Camera stream stopped");
        }
    }

    async fn encode_frame(
        &self,
        stream: &VideoStream,
        quality: u8,
    ) -> Result<Vec<u8>, DeviceError> {
        if !stream.is_active() {
            return Err(DeviceError::NoActiveStream);
        }

        let source = self.source_for(stream.facing()).ok_or_else(|| {
            DeviceError::Unavailable(format!("no {} camera configured", stream.facing()))
        })?;

        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| DeviceError::CaptureFailed(format!("{}: {}", source.display(), e)))?;

        if !bytes.starts_with(&JPEG_SIGNATURE) {
            return Err(DeviceError::CaptureFailed(format!(
                "{} is not a JPEG image",
                source.display()
            )));
        }

        tracing::debug!(
            stream_id = stream.id(),
            bytes = bytes.len(),
            quality = quality,
            "Captured frame"
        );
        Ok(bytes)
    }
}
