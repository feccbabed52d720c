//! Core types for circuit representation.

use std::fmt;

/// Component values and timing for one charge/discharge run.
///
/// The switch connects a source of `source_voltage` through `switch_resistance`
/// for `[0, switch_time]`; afterwards the capacitor discharges through the load
/// alone until `end_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    /// Source voltage (V)
    pub source_voltage: f64,
    /// Load resistance (Ω)
    pub load_resistance: f64,
    /// Series resistance of the closed switch (Ω)
    pub switch_resistance: f64,
    /// Capacitance (F)
    pub capacitance: f64,
    /// Time at which the switch opens (s)
    pub switch_time: f64,
    /// End of the simulated interval (s)
    pub end_time: f64,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            source_voltage: 5.0,
            load_resistance: 20.0,
            switch_resistance: 1.0,
            capacitance: 1.1,
            switch_time: 5.0,
            end_time: 20.0,
        }
    }
}

impl CircuitParameters {
    /// Circuit used by the capacitance and switch-time searches.
    pub fn sizing_preset() -> Self {
        Self {
            source_voltage: 4.8,
            load_resistance: 18.0,
            switch_resistance: 1.0,
            capacitance: 1.6,
            switch_time: 3.5,
            end_time: 100.0,
        }
    }

    /// Norton-equivalent current of the switched source.
    pub fn norton_current(&self) -> f64 {
        self.source_voltage / self.switch_resistance
    }

    /// Load and switch resistance in parallel.
    pub fn thevenin_resistance(&self) -> f64 {
        (self.load_resistance * self.switch_resistance)
            / (self.load_resistance + self.switch_resistance)
    }

    /// Voltage the capacitor approaches while the switch is closed.
    pub fn charge_asymptote(&self) -> f64 {
        self.norton_current() * self.thevenin_resistance()
    }

    /// τ while charging: R_th·C
    pub fn charge_time_constant(&self) -> f64 {
        self.thevenin_resistance() * self.capacitance
    }

    /// τ while discharging: R_load·C
    pub fn discharge_time_constant(&self) -> f64 {
        self.load_resistance * self.capacitance
    }

    pub fn with_capacitance(mut self, capacitance: f64) -> Self {
        self.capacitance = capacitance;
        self
    }

    pub fn with_switch_time(mut self, switch_time: f64) -> Self {
        self.switch_time = switch_time;
        self
    }
}

/// Minimum voltage and current the load needs to count as powered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Voltage threshold (V)
    pub voltage: f64,
    /// Current threshold (A)
    pub current: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            voltage: 3.0,
            current: 0.15,
        }
    }
}

impl Thresholds {
    pub fn new(voltage: f64, current: f64) -> Self {
        Self { voltage, current }
    }

    /// Volt-seconds delivered at threshold over `duration`.
    pub fn volt_seconds(&self, duration: f64) -> f64 {
        duration * self.voltage
    }

    /// Amp-seconds delivered at threshold over `duration`.
    pub fn amp_seconds(&self, duration: f64) -> f64 {
        duration * self.current
    }
}

/// Switch state for a segment of the transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Switch closed, capacitor charging
    Charging,
    /// Switch open, capacitor discharging into the load
    Discharging,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Charging => write!(f, "charging"),
            Phase::Discharging => write!(f, "discharging"),
        }
    }
}

/// Which quantity a series or threshold refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Capacitor voltage
    Voltage,
    /// Load current
    Current,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Voltage => write!(f, "Voltage"),
            Signal::Current => write!(f, "Current"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_quantities() {
        let p = CircuitParameters::default();
        assert_relative_eq!(p.norton_current(), 5.0);
        assert_relative_eq!(p.thevenin_resistance(), 20.0 / 21.0, epsilon = 1e-12);
        assert_relative_eq!(p.charge_asymptote(), 100.0 / 21.0, epsilon = 1e-12);
        assert_relative_eq!(p.charge_time_constant(), 22.0 / 21.0, epsilon = 1e-12);
        assert_relative_eq!(p.discharge_time_constant(), 22.0, epsilon = 1e-12);
    }

    #[test]
    fn test_with_overrides() {
        let p = CircuitParameters::sizing_preset()
            .with_capacitance(2.0)
            .with_switch_time(7.0);
        assert_eq!(p.capacitance, 2.0);
        assert_eq!(p.switch_time, 7.0);
        assert_eq!(p.load_resistance, 18.0);
    }

    #[test]
    fn test_zero_resistance_propagates_nan() {
        let p = CircuitParameters {
            switch_resistance: 0.0,
            ..CircuitParameters::default()
        };
        assert!(p.norton_current().is_infinite());
        assert!(p.charge_asymptote().is_nan());
    }

    #[test]
    fn test_threshold_charge() {
        let t = Thresholds::default();
        assert_relative_eq!(t.volt_seconds(2.0), 6.0);
        assert_relative_eq!(t.amp_seconds(2.0), 0.3, epsilon = 1e-12);
    }
}
