//! Circuit description and input validation.
//!
//! The modelled circuit is a capacitor in parallel with a resistive load,
//! charged through a switch from a voltage source. While the switch is closed
//! the source is treated as its Norton equivalent
//! (`I = V_source / R_switch` in parallel with `R_switch`).

mod types;
mod validate;

pub use types::*;
pub use validate::{validate_parameters, validate_thresholds};
