//! Closed-form transient of the switched RC circuit.

use crate::circuit::{CircuitParameters, Phase, Signal};

use super::series::{linspace, TimeSeries};
use super::DEFAULT_SAMPLES_PER_PHASE;

/// Voltage and current waveforms of one charge/discharge run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transient {
    /// Capacitor voltage over `[0, t_switch]`
    pub charge_voltage: TimeSeries,
    /// Load current over `[0, t_switch]`
    pub charge_current: TimeSeries,
    /// Capacitor voltage over `[t_switch, t_end]`
    pub discharge_voltage: TimeSeries,
    /// Load current over `[t_switch, t_end]`
    pub discharge_current: TimeSeries,
}

impl Transient {
    /// Select one of the four series.
    pub fn series(&self, signal: Signal, phase: Phase) -> &TimeSeries {
        match (signal, phase) {
            (Signal::Voltage, Phase::Charging) => &self.charge_voltage,
            (Signal::Current, Phase::Charging) => &self.charge_current,
            (Signal::Voltage, Phase::Discharging) => &self.discharge_voltage,
            (Signal::Current, Phase::Discharging) => &self.discharge_current,
        }
    }
}

/// Evaluates the charge and discharge equations on a fixed sample grid.
///
/// Charging (switch closed):
/// ```text
/// V(t) = I_source · R_th · (1 − e^(−t/τ)),   τ = R_th · C
/// ```
///
/// Discharging (switch open):
/// ```text
/// V(t) = V_end · e^(−(t − t_switch)/τ_d),    τ_d = R_load · C
/// ```
///
/// The load current is `V(t) / R_load` in both phases.
#[derive(Debug, Clone, Copy)]
pub struct TransientSolver {
    samples_per_phase: usize,
}

impl Default for TransientSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES_PER_PHASE)
    }
}

impl TransientSolver {
    /// Create a solver sampling each phase `samples_per_phase` times (at least once).
    pub fn new(samples_per_phase: usize) -> Self {
        Self {
            samples_per_phase: samples_per_phase.max(1),
        }
    }

    /// Compute the full transient for `params`.
    pub fn solve(&self, params: &CircuitParameters) -> Transient {
        let n = self.samples_per_phase;
        let load = params.load_resistance;

        let asymptote = params.charge_asymptote();
        let tau = params.charge_time_constant();
        let charge_voltage = TimeSeries::from_fn(linspace(0.0, params.switch_time, n), |t| {
            asymptote * (1.0 - (-t / tau).exp())
        });

        // n >= 1, so the charge series always has a final sample
        let v_end = charge_voltage.last().map_or(0.0, |(_, v)| v);
        let tau_d = params.discharge_time_constant();
        let t_switch = params.switch_time;
        let discharge_voltage =
            TimeSeries::from_fn(linspace(t_switch, params.end_time, n), |t| {
                v_end * (-(t - t_switch) / tau_d).exp()
            });

        Transient {
            charge_current: charge_voltage.map(|v| v / load),
            discharge_current: discharge_voltage.map(|v| v / load),
            charge_voltage,
            discharge_voltage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_run() -> Transient {
        TransientSolver::default().solve(&CircuitParameters::default())
    }

    #[test]
    fn test_charge_starts_at_zero_and_rises() {
        let tr = reference_run();
        assert_eq!(tr.charge_voltage.values()[0], 0.0);
        for w in tr.charge_voltage.values().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_charge_end_voltage() {
        let params = CircuitParameters::default();
        let tr = reference_run();
        let (t_end, v_end) = tr.charge_voltage.last().unwrap();

        assert_eq!(t_end, 5.0);
        let tau = (20.0 / 21.0) * 1.1;
        assert_relative_eq!(v_end, (100.0 / 21.0) * (1.0 - (-5.0f64 / tau).exp()), epsilon = 1e-12);
        // ~4.72V, just under the 4.76V asymptote
        assert_abs_diff_eq!(v_end, 4.72, epsilon = 0.01);
        assert!(v_end < params.charge_asymptote());
    }

    #[test]
    fn test_discharge_continuity() {
        let tr = reference_run();
        let (t_charge, v_charge) = tr.charge_voltage.last().unwrap();
        assert_eq!(tr.discharge_voltage.time()[0], t_charge);
        assert_eq!(tr.discharge_voltage.values()[0], v_charge);
        assert_eq!(tr.discharge_voltage.last().unwrap().0, 20.0);
    }

    #[test]
    fn test_discharge_decays() {
        let tr = reference_run();
        for w in tr.discharge_voltage.values().windows(2) {
            assert!(w[1] <= w[0]);
        }
        // 15s into a 22s time constant
        let (_, v_start) = tr.charge_voltage.last().unwrap();
        let (_, v_last) = tr.discharge_voltage.last().unwrap();
        assert_relative_eq!(v_last, v_start * (-15.0f64 / 22.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_current_follows_ohms_law() {
        let tr = reference_run();
        for phase in [Phase::Charging, Phase::Discharging] {
            let v = tr.series(Signal::Voltage, phase);
            let i = tr.series(Signal::Current, phase);
            assert_eq!(v.len(), 1000);
            for ((tv, vv), (ti, ii)) in v.iter().zip(i.iter()) {
                assert_eq!(tv, ti);
                assert!((ii - vv / 20.0).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_zero_capacitance_does_not_panic() {
        let params = CircuitParameters::default().with_capacitance(0.0);
        let tr = TransientSolver::default().solve(&params);
        // the first sample of each phase gives 0/0 in the exponent
        assert!(tr.charge_voltage.values()[0].is_nan());
        assert!(tr.discharge_voltage.values()[0].is_nan());
        assert!(tr.discharge_current.values()[0].is_nan());
    }

    #[test]
    fn test_single_sample_per_phase() {
        let tr = TransientSolver::new(0).solve(&CircuitParameters::default());
        assert_eq!(tr.charge_voltage.len(), 1);
        assert_eq!(tr.charge_voltage.values(), &[0.0]);
        assert_eq!(tr.discharge_voltage.values(), &[0.0]);
        assert_eq!(tr.discharge_voltage.time(), &[5.0]);
    }
}
