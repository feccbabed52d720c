//! Per-candidate evaluation results.

use crate::circuit::{CircuitParameters, Phase, Signal, Thresholds};
use crate::error::{RcError, Result};
use crate::solver::{CrossingDetector, Transient};

/// Threshold-crossing times of one transient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossings {
    /// Voltage reaches `V_thresh` while charging
    pub voltage_charged: f64,
    /// Voltage falls back to `V_thresh` while discharging
    pub voltage_discharged: f64,
    /// Current reaches `I_thresh` while charging
    pub current_charged: f64,
    /// Current falls back to `I_thresh` while discharging
    pub current_discharged: f64,
}

impl Crossings {
    /// Locate all four crossings, failing on the first one that is missing.
    pub fn locate(
        transient: &Transient,
        thresholds: &Thresholds,
        detector: &CrossingDetector,
    ) -> Result<Self> {
        let find = |signal: Signal, phase: Phase| {
            let threshold = match signal {
                Signal::Voltage => thresholds.voltage,
                Signal::Current => thresholds.current,
            };
            detector.find(transient.series(signal, phase), threshold, signal, phase)
        };

        Ok(Self {
            voltage_charged: find(Signal::Voltage, Phase::Charging)?,
            voltage_discharged: find(Signal::Voltage, Phase::Discharging)?,
            current_charged: find(Signal::Current, Phase::Charging)?,
            current_discharged: find(Signal::Current, Phase::Discharging)?,
        })
    }

    /// Time the voltage spends above its threshold.
    pub fn voltage_interval(&self) -> f64 {
        self.voltage_discharged - self.voltage_charged
    }

    /// Time the current spends above its threshold.
    pub fn current_interval(&self) -> f64 {
        self.current_discharged - self.current_charged
    }

    /// Overlap of the voltage and current intervals.
    ///
    /// Rejected when it is longer than either interval or negative.
    pub fn time_powered(&self) -> Result<f64> {
        let time_powered = self.current_discharged.min(self.voltage_discharged)
            - self.current_charged.max(self.voltage_charged);
        let voltage_interval = self.voltage_interval();
        let current_interval = self.current_interval();

        if time_powered > voltage_interval || time_powered > current_interval || time_powered < 0.0
        {
            return Err(RcError::InvalidInterval {
                time_powered,
                voltage_interval,
                current_interval,
            });
        }
        Ok(time_powered)
    }
}

/// An accepted grid point without its waveforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSummary {
    /// Value of the swept parameter
    pub value: f64,
    /// Length of the powered window (s)
    pub time_powered: f64,
    pub crossings: Crossings,
}

/// An accepted grid point with its full transient.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResult {
    pub summary: CandidateSummary,
    /// Circuit the transient was computed for
    pub params: CircuitParameters,
    pub transient: Transient,
}

impl CandidateResult {
    pub fn value(&self) -> f64 {
        self.summary.value
    }

    pub fn time_powered(&self) -> f64 {
        self.summary.time_powered
    }

    pub fn crossings(&self) -> &Crossings {
        &self.summary.crossings
    }
}
