//! Scan lifecycle states and the transition table
//!
//! The table is pure: it decides where an event leads without touching any
//! collaborator. The controller consults it before performing side effects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanState {
    /// Idle, nothing held
    Home,
    /// Camera stream live, waiting for capture
    Scanning,
    /// Frame sent to the vision service
    Analyzing,
    /// A report is displayed
    Result,
    /// Browsing past reports
    History,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::Home
    }
}

/// Something that moves the controller between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanEvent {
    /// Ask for a camera stream
    StartScan,
    /// A requested stream arrived
    StreamAcquired,
    /// A requested stream could not be opened
    StreamFailed,
    /// Switch to the other camera
    FlipCamera,
    /// Take the picture
    Capture,
    /// The frame could not be encoded
    CaptureFailed,
    /// The service returned a valid report
    AnalysisSucceeded,
    /// The service call failed or the report was rejected
    AnalysisFailed,
    /// Leave the camera without capturing
    Cancel,
    /// Leave while an analysis is outstanding
    Abandon,
    OpenHistory,
    CloseHistory,
    /// Display a stored report
    SelectEntry,
    /// Dismiss the result
    NewSession,
    /// Delete an entry other than the one displayed
    DeleteEntry,
    /// Delete the entry currently displayed
    DeleteDisplayed,
}

impl ScanState {
    /// Upper-case state name, as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Scanning => "SCANNING",
            Self::Analyzing => "ANALYZING",
            Self::Result => "RESULT",
            Self::History => "HISTORY",
        }
    }

    /// State reached by applying `event`, or `None` if not permitted
    ///
    /// # Examples
    ///
    /// ```
    /// use glossa::core::scan::{ScanEvent, ScanState};
    ///
    /// assert_eq!(ScanState::Scanning.next(ScanEvent::Capture), Some(ScanState::Analyzing));
    /// assert_eq!(ScanState::Home.next(ScanEvent::Capture), None);
    /// ```
    pub fn next(self, event: ScanEvent) -> Option<ScanState> {
        use ScanEvent::*;
        use ScanState::*;

        match (self, event) {
            (Home, StartScan) => Some(Home),
            (Home, StreamAcquired) => Some(Scanning),
            (Home, StreamFailed) => Some(Home),
            (Home, OpenHistory) => Some(History),

            (Scanning, StreamAcquired) => Some(Scanning),
            (Scanning, StreamFailed) => Some(Home),
            (Scanning, FlipCamera) => Some(Scanning),
            (Scanning, Capture) => Some(Analyzing),
            (Scanning, CaptureFailed) => Some(Home),
            (Scanning, Cancel) => Some(Home),

            (Analyzing, AnalysisSucceeded) => Some(Result),
            (Analyzing, AnalysisFailed) => Some(Home),
            (Analyzing, Abandon) => Some(Home),

            (Result, NewSession) => Some(Home),
            (Result, DeleteEntry) => Some(Result),
            (Result, DeleteDisplayed) => Some(History),

            (History, CloseHistory) => Some(Home),
            (History, SelectEntry) => Some(Result),
            (History, DeleteEntry) => Some(History),

            _ => None,
        }
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScanEvent {
    /// Action name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartScan => "start scan",
            Self::StreamAcquired => "attach stream",
            Self::StreamFailed => "report stream failure",
            Self::FlipCamera => "flip camera",
            Self::Capture => "capture",
            Self::CaptureFailed => "report capture failure",
            Self::AnalysisSucceeded => "show analysis result",
            Self::AnalysisFailed => "report analysis failure",
            Self::Cancel => "cancel scan",
            Self::Abandon => "abandon analysis",
            Self::OpenHistory => "open history",
            Self::CloseHistory => "close history",
            Self::SelectEntry => "select history entry",
            Self::NewSession => "start new session",
            Self::DeleteEntry | Self::DeleteDisplayed => "delete history entry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ScanState::Home, ScanEvent::StreamAcquired, ScanState::Scanning; "start scan")]
    #[test_case(ScanState::Home, ScanEvent::StreamFailed, ScanState::Home; "device error stays home")]
    #[test_case(ScanState::Scanning, ScanEvent::Capture, ScanState::Analyzing; "capture")]
    #[test_case(ScanState::Scanning, ScanEvent::CaptureFailed, ScanState::Home; "capture failure")]
    #[test_case(ScanState::Scanning, ScanEvent::Cancel, ScanState::Home; "cancel")]
    #[test_case(ScanState::Scanning, ScanEvent::StreamFailed, ScanState::Home; "flip failure")]
    #[test_case(ScanState::Analyzing, ScanEvent::AnalysisSucceeded, ScanState::Result; "analysis ok")]
    #[test_case(ScanState::Analyzing, ScanEvent::AnalysisFailed, ScanState::Home; "analysis failed")]
    #[test_case(ScanState::Analyzing, ScanEvent::Abandon, ScanState::Home; "abandon")]
    #[test_case(ScanState::Home, ScanEvent::OpenHistory, ScanState::History; "open history")]
    #[test_case(ScanState::History, ScanEvent::CloseHistory, ScanState::Home; "close history")]
    #[test_case(ScanState::History, ScanEvent::SelectEntry, ScanState::Result; "select entry")]
    #[test_case(ScanState::Result, ScanEvent::NewSession, ScanState::Home; "new session")]
    #[test_case(ScanState::Result, ScanEvent::DeleteDisplayed, ScanState::History; "delete displayed")]
    fn test_permitted_transitions(from: ScanState, event: ScanEvent, to: ScanState) {
        assert_eq!(from.next(event), Some(to));
    }

    #[test_case(ScanState::Home, ScanEvent::Capture; "capture from home")]
    #[test_case(ScanState::Analyzing, ScanEvent::Capture; "double capture")]
    #[test_case(ScanState::Result, ScanEvent::SelectEntry; "select from result")]
    #[test_case(ScanState::Analyzing, ScanEvent::OpenHistory; "history while analyzing")]
    #[test_case(ScanState::Home, ScanEvent::DeleteEntry; "delete from home")]
    #[test_case(ScanState::Scanning, ScanEvent::StartScan; "restart while scanning")]
    #[test_case(ScanState::History, ScanEvent::AnalysisSucceeded; "late result in history")]
    fn test_rejected_transitions(from: ScanState, event: ScanEvent) {
        assert_eq!(from.next(event), None);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(ScanState::default(), ScanState::Home);
        assert_eq!(ScanState::Analyzing.to_string(), "ANALYZING");
        assert_eq!(
            serde_json::to_value(ScanState::Result).unwrap(),
            serde_json::json!("RESULT")
        );
    }
}
