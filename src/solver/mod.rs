//! Transient solver and threshold-crossing detection.
//!
//! The circuit has a closed-form solution, so there is no time stepping: each
//! phase is sampled on an evenly spaced grid and evaluated directly.
//!
//! ```text
//!            R_switch
//!   V_src ──/\/\──┬────┬──
//!                 │    │
//!                 C  R_load
//!                 │    │
//!   GND ──────────┴────┴──
//! ```
//!
//! While the switch is closed the source is replaced by its Norton
//! equivalent, a current `V_src / R_switch` in parallel with `R_switch`, so
//! the capacitor sees `R_switch ∥ R_load`. Once the switch opens it discharges
//! through `R_load` alone.

mod crossing;
mod series;
mod transient;

pub use crossing::{close_indices, first_close_index, is_close, CrossingDetector};
pub use series::{linspace, TimeSeries};
pub use transient::{Transient, TransientSolver};

/// Samples per charge or discharge phase.
pub const DEFAULT_SAMPLES_PER_PHASE: usize = 1000;

/// Relative tolerance for voltage and current threshold crossings.
pub const CROSSING_TOLERANCE: f64 = 1e-3;

/// Absolute tolerance floor used by [`is_close`].
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;
