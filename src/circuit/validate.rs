//! Input validation.
//!
//! The solver itself never validates: degenerate values such as C=0 flow
//! through as NaN/inf. These checks run at the CLI and WASM boundaries.

use crate::error::{RcError, Result};

use super::{CircuitParameters, Thresholds};

/// Validate circuit parameters supplied by a user.
///
/// Checks:
/// - Every value is finite and non-negative
/// - The switch opens no later than the end of the simulation
pub fn validate_parameters(params: &CircuitParameters) -> Result<()> {
    let fields = [
        ("source_voltage", params.source_voltage),
        ("load_resistance", params.load_resistance),
        ("switch_resistance", params.switch_resistance),
        ("capacitance", params.capacitance),
        ("switch_time", params.switch_time),
        ("end_time", params.end_time),
    ];

    for (name, value) in fields {
        check_non_negative(name, value)?;
    }

    if params.switch_time > params.end_time {
        return Err(RcError::invalid_parameter(
            "switch_time",
            format!(
                "switch opens at {}s, after the simulation ends at {}s",
                params.switch_time, params.end_time
            ),
        ));
    }

    Ok(())
}

/// Validate user-supplied thresholds.
pub fn validate_thresholds(thresholds: &Thresholds) -> Result<()> {
    check_non_negative("voltage_threshold", thresholds.voltage)?;
    check_non_negative("current_threshold", thresholds.current)
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RcError::invalid_parameter(name, "value must be finite"));
    }
    if value < 0.0 {
        return Err(RcError::invalid_parameter(
            name,
            format!("value must be non-negative, got {}", value),
        ));
    }
    Ok(())
}
