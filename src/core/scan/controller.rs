//! Scan lifecycle controller
//!
//! Owns the screen state, the camera stream, the history store and the
//! collaborators. It is driven through `&mut self` from a single task.
//!
//! The two suspension points, stream acquisition and analysis, are split into
//! a request the controller hands out and a completion the caller hands back.
//! Each request carries the generation current when it was issued; every
//! transition advances the generation, so a completion arriving after the user
//! has moved on is recognised as stale and discarded. A stale stream is
//! stopped on the spot.

use super::state::{ScanEvent, ScanState};
use crate::adapters::camera::{Camera, VideoStream};
use crate::adapters::vision::VisionAnalyzer;
use crate::config::GlossaConfig;
use crate::core::history::HistoryStore;
use crate::domain::{
    DeviceError, EntryId, FacingMode, GlossaError, HealthReport, HistoryEntry, Language, Result,
    ServiceError,
};
use crate::log_transition;
use std::sync::Arc;

/// Default lossy encoding quality for captured frames
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// User-selectable scan settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Camera requested on the next stream acquisition
    pub facing: FacingMode,
    /// Language the report is requested in
    pub language: Language,
    /// Frame encoding quality, 1-100
    pub jpeg_quality: u8,
}

impl ScanSettings {
    /// Settings from the loaded configuration
    pub fn from_config(config: &GlossaConfig) -> Self {
        Self {
            facing: config.camera.facing,
            language: config.application.language,
            jpeg_quality: config.camera.jpeg_quality,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            facing: FacingMode::default(),
            language: Language::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Outstanding request for a camera stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    generation: u64,
    facing: FacingMode,
}

impl StreamRequest {
    /// Generation the completion must match
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Camera to open
    pub fn facing(&self) -> FacingMode {
        self.facing
    }
}

/// Outstanding request for an analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    generation: u64,
    image: Vec<u8>,
    language: Language,
}

impl AnalysisRequest {
    /// Generation the completion must match
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Encoded frame to send
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Language to request the report in
    pub fn language(&self) -> Language {
        self.language
    }

    /// Pair this request's generation with the service outcome
    pub fn respond(self, outcome: std::result::Result<HealthReport, ServiceError>) -> AnalysisResponse {
        AnalysisResponse::new(self.generation, outcome)
    }
}

/// Result of an analysis, tagged with the generation it answers
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    generation: u64,
    outcome: std::result::Result<HealthReport, ServiceError>,
}

impl AnalysisResponse {
    pub fn new(generation: u64, outcome: std::result::Result<HealthReport, ServiceError>) -> Self {
        Self {
            generation,
            outcome,
        }
    }
}

/// What happened to a completion handed back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion succeeded and moved the controller forward
    Applied,
    /// The completion carried a failure; an error was recorded
    Failed,
    /// The completion answered a superseded request and was discarded
    Stale,
}

/// Scan lifecycle controller
pub struct ScanController {
    camera: Arc<dyn Camera>,
    analyzer: Arc<dyn VisionAnalyzer>,
    history: HistoryStore,
    settings: ScanSettings,
    state: ScanState,
    generation: u64,
    stream: Option<VideoStream>,
    displayed: Option<EntryId>,
    last_error: Option<String>,
}

impl ScanController {
    /// Create a controller in `HOME`
    pub fn new(
        camera: Arc<dyn Camera>,
        analyzer: Arc<dyn VisionAnalyzer>,
        history: HistoryStore,
        settings: ScanSettings,
    ) -> Self {
        Self {
            camera,
            analyzer,
            history,
            settings,
            state: ScanState::Home,
            generation: 0,
            stream: None,
            displayed: None,
            last_error: None,
        }
    }

    /// Current screen
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current settings
    pub fn settings(&self) -> ScanSettings {
        self.settings
    }

    /// Change the report language for subsequent analyses
    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    /// Whether a camera stream is held
    pub fn has_active_stream(&self) -> bool {
        self.stream.as_ref().is_some_and(VideoStream::is_active)
    }

    /// Most recent user-visible error, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dismiss the user-visible error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// History store
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Entry shown on the result screen
    pub fn displayed_entry(&self) -> Option<&HistoryEntry> {
        if self.state != ScanState::Result {
            return None;
        }
        self.displayed
            .as_ref()
            .and_then(|id| self.history.find_by_id(id))
    }

    /// Shared handle to the analyzer, for callers that drive the analysis
    /// call themselves
    pub fn analyzer(&self) -> Arc<dyn VisionAnalyzer> {
        Arc::clone(&self.analyzer)
    }

    /// Shared handle to the camera
    pub fn camera(&self) -> Arc<dyn Camera> {
        Arc::clone(&self.camera)
    }

    /// Ask for a camera stream with the configured facing mode
    ///
    /// The controller stays in `HOME` until the stream arrives through
    /// [`complete_scan_start`](Self::complete_scan_start). Issuing a new
    /// request supersedes any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `HOME`.
    pub fn begin_scan(&mut self) -> Result<StreamRequest> {
        let next = self.target(ScanEvent::StartScan)?;
        self.last_error = None;
        self.advance(next);

        Ok(StreamRequest {
            generation: self.generation,
            facing: self.settings.facing,
        })
    }

    /// Hand back the outcome of a stream request
    ///
    /// A stale stream is stopped immediately. A device error moves the
    /// controller to `HOME` holding no stream.
    pub fn complete_scan_start(
        &mut self,
        generation: u64,
        result: std::result::Result<VideoStream, DeviceError>,
    ) -> Completion {
        let awaiting = generation == self.generation
            && self.stream.is_none()
            && self.state.next(ScanEvent::StreamAcquired).is_some();

        if !awaiting {
            tracing::debug!(
                generation,
                current = self.generation,
                state = %self.state,
                "Discarding stale stream completion"
            );
            if let Ok(mut stream) = result {
                self.camera.stop_stream(&mut stream);
            }
            return Completion::Stale;
        }

        match result {
            Ok(stream) => {
                tracing::info!(stream_id = stream.id(), facing = %stream.facing(), "Camera ready");
                self.stream = Some(stream);
                self.advance(ScanState::Scanning);
                Completion::Applied
            }
            Err(e) => {
                self.record_error(&GlossaError::Device(e));
                self.advance(ScanState::Home);
                Completion::Failed
            }
        }
    }

    /// Switch to the other camera
    ///
    /// The current stream is released first; the new one arrives through
    /// [`complete_scan_start`](Self::complete_scan_start).
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `SCANNING`.
    pub fn flip_camera(&mut self) -> Result<StreamRequest> {
        let next = self.target(ScanEvent::FlipCamera)?;
        self.release_stream();
        self.settings.facing = self.settings.facing.toggled();
        self.advance(next);

        Ok(StreamRequest {
            generation: self.generation,
            facing: self.settings.facing,
        })
    }

    /// Capture the current frame and leave `SCANNING`
    ///
    /// The stream is stopped whether or not encoding succeeds.
    ///
    /// # Errors
    ///
    /// - [`GlossaError::InvalidTransition`] outside `SCANNING`
    /// - [`DeviceError::NoActiveStream`] while a stream is still pending; state is unchanged
    /// - [`GlossaError::Device`] if encoding fails; the controller is back in `HOME`
    pub async fn capture(&mut self) -> Result<AnalysisRequest> {
        let next = self.target(ScanEvent::Capture)?;

        let encoded = match self.stream.as_ref() {
            Some(stream) => {
                self.camera
                    .encode_frame(stream, self.settings.jpeg_quality)
                    .await
            }
            None => return Err(DeviceError::NoActiveStream.into()),
        };
        self.release_stream();

        match encoded {
            Ok(image) => {
                tracing::info!(bytes = image.len(), "Frame captured");
                self.advance(next);
                Ok(AnalysisRequest {
                    generation: self.generation,
                    image,
                    language: self.settings.language,
                })
            }
            Err(e) => {
                let error = GlossaError::Device(e);
                self.record_error(&error);
                self.advance(ScanState::Home);
                Err(error)
            }
        }
    }

    /// Hand back the outcome of an analysis request
    ///
    /// On success the report is appended to history and displayed. On a
    /// service failure the controller returns to `HOME` with no history entry.
    ///
    /// # Errors
    ///
    /// Returns a store error if the report could not be persisted; the
    /// controller is then in `HOME` and history is unchanged.
    pub fn complete_analysis(&mut self, response: AnalysisResponse) -> Result<Completion> {
        if response.generation != self.generation || self.state != ScanState::Analyzing {
            tracing::debug!(
                generation = response.generation,
                current = self.generation,
                state = %self.state,
                "Discarding stale analysis result"
            );
            return Ok(Completion::Stale);
        }

        match response.outcome {
            Ok(report) => match self.history.append(report) {
                Ok(entry) => {
                    self.displayed = Some(entry.id().clone());
                    self.advance(ScanState::Result);
                    Ok(Completion::Applied)
                }
                Err(e) => {
                    self.record_error(&e);
                    self.advance(ScanState::Home);
                    Err(e)
                }
            },
            Err(e) => {
                self.record_error(&GlossaError::Service(e));
                self.advance(ScanState::Home);
                Ok(Completion::Failed)
            }
        }
    }

    /// Leave the camera without capturing
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `SCANNING`.
    pub fn cancel_scan(&mut self) -> Result<()> {
        let next = self.target(ScanEvent::Cancel)?;
        self.release_stream();
        self.advance(next);
        Ok(())
    }

    /// Go home while an analysis is outstanding; its result will be discarded
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `ANALYZING`.
    pub fn abandon_analysis(&mut self) -> Result<()> {
        let next = self.target(ScanEvent::Abandon)?;
        tracing::info!("Analysis abandoned");
        self.advance(next);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `HOME`.
    pub fn open_history(&mut self) -> Result<()> {
        let next = self.target(ScanEvent::OpenHistory)?;
        self.advance(next);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `HISTORY`.
    pub fn close_history(&mut self) -> Result<()> {
        let next = self.target(ScanEvent::CloseHistory)?;
        self.advance(next);
        Ok(())
    }

    /// Display a stored entry without re-running the analysis
    ///
    /// # Errors
    ///
    /// - [`GlossaError::InvalidTransition`] outside `HISTORY`
    /// - [`GlossaError::Validation`] if no entry has `id`; the controller stays in `HISTORY`
    pub fn select_entry(&mut self, id: &EntryId) -> Result<()> {
        let next = self.target(ScanEvent::SelectEntry)?;

        if self.history.find_by_id(id).is_none() {
            let error = GlossaError::Validation(format!("No history entry with id '{id}'"));
            self.record_error(&error);
            return Err(error);
        }

        self.displayed = Some(id.clone());
        self.advance(next);
        Ok(())
    }

    /// Dismiss the result and return home
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `RESULT`.
    pub fn new_session(&mut self) -> Result<()> {
        let next = self.target(ScanEvent::NewSession)?;
        self.displayed = None;
        self.advance(next);
        Ok(())
    }

    /// Delete a stored entry
    ///
    /// Deleting the entry shown on the result screen moves to `HISTORY`.
    ///
    /// # Errors
    ///
    /// - [`GlossaError::InvalidTransition`] outside `RESULT` and `HISTORY`
    /// - [`GlossaError::Store`] if the deletion could not be persisted; nothing changes
    pub fn delete_entry(&mut self, id: &EntryId) -> Result<()> {
        let event = if self.state == ScanState::Result && self.displayed.as_ref() == Some(id) {
            ScanEvent::DeleteDisplayed
        } else {
            ScanEvent::DeleteEntry
        };
        let next = self.target(event)?;

        if let Err(e) = self.history.delete(id) {
            self.record_error(&e);
            return Err(e);
        }

        if event == ScanEvent::DeleteDisplayed {
            self.displayed = None;
        }
        self.advance(next);
        Ok(())
    }

    /// Request a stream and wait for it
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `HOME`. Camera
    /// failures are reported as [`Completion::Failed`] with the error recorded.
    pub async fn start_scan(&mut self) -> Result<Completion> {
        let request = self.begin_scan()?;
        let result = self.camera.acquire_stream(request.facing()).await;
        Ok(self.complete_scan_start(request.generation(), result))
    }

    /// Flip the camera and wait for the new stream
    ///
    /// # Errors
    ///
    /// Returns [`GlossaError::InvalidTransition`] outside `SCANNING`.
    pub async fn switch_camera(&mut self) -> Result<Completion> {
        let request = self.flip_camera()?;
        let result = self.camera.acquire_stream(request.facing()).await;
        Ok(self.complete_scan_start(request.generation(), result))
    }

    /// Capture, analyze and route the result in one step
    ///
    /// # Errors
    ///
    /// See [`capture`](Self::capture) and
    /// [`complete_analysis`](Self::complete_analysis).
    pub async fn capture_and_analyze(&mut self) -> Result<Completion> {
        let request = self.capture().await?;
        let analyzer = self.analyzer();

        tracing::info!(model = analyzer.model(), "Analyzing capture");
        let outcome = analyzer
            .analyze(request.image(), request.language())
            .await;

        self.complete_analysis(request.respond(outcome))
    }

    fn target(&self, event: ScanEvent) -> Result<ScanState> {
        self.state
            .next(event)
            .ok_or(GlossaError::InvalidTransition {
                state: self.state.as_str(),
                action: event.as_str(),
            })
    }

    fn advance(&mut self, next: ScanState) {
        self.generation += 1;
        if next != self.state {
            log_transition!(self.state, next, self.generation);
        }
        self.state = next;
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            self.camera.stop_stream(&mut stream);
        }
    }

    fn record_error(&mut self, error: &GlossaError) {
        tracing::warn!(state = %self.state, error = %error, "Scan step failed");
        self.last_error = Some(error.to_string());
    }
}

impl Drop for ScanController {
    fn drop(&mut self) {
        self.release_stream();
    }
}
