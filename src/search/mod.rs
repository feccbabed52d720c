//! Single-parameter grid search for the longest powered window.
//!
//! ## Scoring a candidate
//!
//! For each grid value the circuit is solved and the four threshold-crossing
//! times are located:
//!
//! ```text
//! time_powered = min(I_discharged, V_discharged) − max(I_charged, V_charged)
//! ```
//!
//! A candidate is skipped when a crossing is missing, or when its powered
//! window is negative or longer than either above-threshold interval.
//!
//! ## Selecting a result
//!
//! [`GridSearch::run`] keeps the first candidate to reach the running maximum
//! (see [`BestSelection`]). [`GridSearch::run_for_duration`] instead picks the
//! median candidate whose window matches a required duration, which for a
//! switch-time sweep gives the shortest practical charging impulse.

mod candidate;
mod config;
mod grid;
mod sweep;

use std::fmt;

pub use candidate::{CandidateResult, CandidateSummary, Crossings};
pub use config::{BestSelection, SearchConfig};
pub use grid::{GridSearch, SearchOutcome};
pub use sweep::{median_index, Sweep};

use crate::circuit::CircuitParameters;
use crate::error::{RcError, Result};
use crate::solver::linspace;

/// Relative tolerance when matching a required powered duration.
pub const TARGET_TOLERANCE: f64 = 1e-1;

/// The circuit value varied by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepParameter {
    /// Time at which the switch opens (s)
    SwitchTime,
    /// Capacitance (F)
    Capacitance,
}

impl SweepParameter {
    /// Copy `base` with this parameter set to `value`.
    pub fn apply(&self, base: &CircuitParameters, value: f64) -> CircuitParameters {
        match self {
            SweepParameter::SwitchTime => base.with_switch_time(value),
            SweepParameter::Capacitance => base.with_capacitance(value),
        }
    }

    /// SI unit symbol.
    pub fn unit(&self) -> &'static str {
        match self {
            SweepParameter::SwitchTime => "s",
            SweepParameter::Capacitance => "F",
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepParameter::SwitchTime => write!(f, "switch_time"),
            SweepParameter::Capacitance => write!(f, "capacitance"),
        }
    }
}

/// `count` evenly spaced values over `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRange {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl GridRange {
    pub fn new(lo: f64, hi: f64, count: usize) -> Self {
        Self { lo, hi, count }
    }

    /// The grid values in ascending order. A degenerate range gives `[lo]`.
    pub fn values(&self) -> Result<Vec<f64>> {
        if self.count == 0 {
            return Err(RcError::invalid_grid("grid must have at least one point"));
        }
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(RcError::invalid_grid(format!(
                "bounds must be finite, got [{}, {}]",
                self.lo, self.hi
            )));
        }
        if self.lo > self.hi {
            return Err(RcError::invalid_grid(format!(
                "lower bound {} exceeds upper bound {}",
                self.lo, self.hi
            )));
        }
        if self.lo == self.hi {
            return Ok(vec![self.lo]);
        }
        Ok(linspace(self.lo, self.hi, self.count))
    }
}
