//! Cosmetic progress indicator for a pending analysis
//!
//! The vision service reports no progress, so the indicator creeps forward by
//! random steps and parks below [`PENDING_CEILING`] until the analysis
//! resolves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Highest value shown while the analysis is still pending
pub const PENDING_CEILING: f64 = 90.0;

/// Largest single random step
pub const MAX_STEP: f64 = 15.0;

/// Suggested delay between ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(400);

/// Percentage indicator, 0 to 100
#[derive(Debug)]
pub struct AnalysisProgress {
    percent: f64,
    complete: bool,
    rng: StdRng,
}

impl AnalysisProgress {
    /// Start at zero with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Start at zero with a deterministic generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            percent: 0.0,
            complete: false,
            rng,
        }
    }

    /// Advance by a random step, never reaching 100 before completion
    pub fn tick(&mut self) -> f64 {
        if !self.complete && self.percent < PENDING_CEILING {
            let step = self.rng.gen_range(0.0..MAX_STEP);
            self.percent = (self.percent + step).min(PENDING_CEILING);
        }
        self.percent
    }

    /// Jump to 100%
    pub fn complete(&mut self) {
        self.complete = true;
        self.percent = 100.0;
    }

    /// Current value
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Whether the analysis has resolved
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Default for AnalysisProgress {
    fn default() -> Self {
        Self::new()
    }
}
