//! # rc_tune
//!
//! Sizing tool for a capacitor-buffered load behind a switched supply.
//!
//! This library provides:
//! - Closed-form transient of an RC circuit charged through a switch from a
//!   Norton-equivalent source and discharged into a resistive load
//! - Threshold-crossing detection on the sampled voltage and current
//! - Grid search over switch time or capacitance for the longest window in
//!   which both a voltage and a current threshold are met
//! - CSV export of sweep curves and waveforms
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit parameters, thresholds and input validation
//! - [`solver`] - Transient solver and crossing detector
//! - [`search`] - Grid search and best-candidate selection
//! - [`output`] - CSV writers
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rctune capacitance --lo 0.01 --hi 10 --steps 1000
//! rctune impulse --required 10 --sweep-csv sweep.csv
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use rc_tune::{CircuitParameters, GridRange, GridSearch, SweepParameter, Thresholds};
//!
//! let search = GridSearch::new(
//!     CircuitParameters::sizing_preset(),
//!     Thresholds::default(),
//!     SweepParameter::Capacitance,
//!     GridRange::new(0.01, 10.0, 1000),
//! );
//! let outcome = search.run()?;
//! let best = &outcome.selected;
//! println!("C = {} F, powered for {} s", best.value(), best.time_powered());
//! # Ok::<(), rc_tune::RcError>(())
//! ```
//!
//! ## Powered window
//!
//! Both thresholds are crossed once on the way up (charging) and once on the
//! way down (discharging). The load counts as powered while both signals are
//! above threshold:
//!
//! ```text
//! time_powered = min(I_discharged, V_discharged) − max(I_charged, V_charged)
//! ```

pub mod circuit;
pub mod error;
pub mod output;
pub mod search;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{CircuitParameters, Thresholds};
pub use error::{RcError, Result};
pub use search::{GridRange, GridSearch, SearchConfig, SearchOutcome, SweepParameter};
pub use solver::{Transient, TransientSolver};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{WasmCandidate, WasmRcCircuit};
