//! Search configuration.

use crate::solver::{CROSSING_TOLERANCE, DEFAULT_SAMPLES_PER_PHASE};

use super::TARGET_TOLERANCE;

/// How the best candidate is picked from the accepted sweep entries.
///
/// Both policies compare each candidate against the running maximum of all
/// earlier accepted candidates and keep the first one to reach a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BestSelection {
    /// Plain running maximum: the first accepted candidate is eligible.
    #[default]
    RunningMax,
    /// The first accepted candidate only seeds the running maximum and can
    /// never be selected itself.
    AfterFirst,
}

/// Configuration for a grid search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Samples per charge or discharge phase.
    pub samples_per_phase: usize,
    /// Relative tolerance for threshold crossings.
    pub crossing_tolerance: f64,
    /// Relative tolerance when matching a required powered duration.
    pub target_tolerance: f64,
    /// Best-candidate selection policy.
    pub selection: BestSelection,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            samples_per_phase: DEFAULT_SAMPLES_PER_PHASE,
            crossing_tolerance: CROSSING_TOLERANCE,
            target_tolerance: TARGET_TOLERANCE,
            selection: BestSelection::default(),
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples per phase.
    ///
    /// Coarser sampling is faster but skips more candidates, since samples
    /// are more likely to step over the crossing tolerance band.
    pub fn with_samples_per_phase(mut self, samples_per_phase: usize) -> Self {
        self.samples_per_phase = samples_per_phase;
        self
    }

    /// Set the relative crossing tolerance.
    pub fn with_crossing_tolerance(mut self, tolerance: f64) -> Self {
        self.crossing_tolerance = tolerance;
        self
    }

    /// Set the relative tolerance for required-duration matching.
    pub fn with_target_tolerance(mut self, tolerance: f64) -> Self {
        self.target_tolerance = tolerance;
        self
    }

    /// Set the best-candidate selection policy.
    pub fn with_selection(mut self, selection: BestSelection) -> Self {
        self.selection = selection;
        self
    }
}
