//! Scan lifecycle
//!
//! - [`state`] - Screen states and the pure transition table
//! - [`controller`] - The controller that performs transitions and their side effects
//! - [`progress`] - Cosmetic progress indicator shown while analyzing

pub mod controller;
pub mod progress;
pub mod state;

pub use controller::{
    AnalysisRequest, AnalysisResponse, Completion, ScanController, ScanSettings, StreamRequest,
};
pub use progress::AnalysisProgress;
pub use state::{ScanEvent, ScanState};
