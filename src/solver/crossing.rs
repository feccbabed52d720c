//! Threshold-crossing detection on sampled series.

use crate::circuit::{Phase, Signal};
use crate::error::{RcError, Result};

use super::series::TimeSeries;
use super::{ABSOLUTE_TOLERANCE, CROSSING_TOLERANCE};

/// `|value − target| <= atol + rtol·|target|`, with a fixed absolute floor.
///
/// NaN is never close to anything.
pub fn is_close(value: f64, target: f64, rtol: f64) -> bool {
    (value - target).abs() <= ABSOLUTE_TOLERANCE + rtol * target.abs()
}

/// Index of the first value close to `target`.
pub fn first_close_index(values: &[f64], target: f64, rtol: f64) -> Option<usize> {
    values.iter().position(|&v| is_close(v, target, rtol))
}

/// Indices of every value close to `target`, ascending.
pub fn close_indices(values: &[f64], target: f64, rtol: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| is_close(**v, target, rtol))
        .map(|(i, _)| i)
        .collect()
}

/// Finds the first sample time at which a series reaches a threshold.
///
/// A sample "reaches" the threshold when it lies within the relative
/// tolerance of it. Coarse sampling can step over the tolerance band, in which
/// case no crossing is reported.
#[derive(Debug, Clone, Copy)]
pub struct CrossingDetector {
    rtol: f64,
}

impl Default for CrossingDetector {
    fn default() -> Self {
        Self::new(CROSSING_TOLERANCE)
    }
}

impl CrossingDetector {
    pub fn new(rtol: f64) -> Self {
        Self { rtol }
    }

    /// Time of the first sample of `series` close to `threshold`.
    ///
    /// `signal` and `phase` only label the error.
    pub fn find(
        &self,
        series: &TimeSeries,
        threshold: f64,
        signal: Signal,
        phase: Phase,
    ) -> Result<f64> {
        first_close_index(series.values(), threshold, self.rtol)
            .map(|i| series.time()[i])
            .ok_or(RcError::CrossingNotFound {
                signal,
                phase,
                threshold,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::linspace;

    fn ramp() -> TimeSeries {
        // 0.0, 0.1, ... 1.0 over 0..10s
        TimeSeries::from_fn(linspace(0.0, 10.0, 11), |t| t / 10.0)
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(3.002, 3.0, 1e-3));
        assert!(!is_close(3.004, 3.0, 1e-3));
        assert!(is_close(1e-9, 0.0, 1e-3));
        assert!(!is_close(f64::NAN, 3.0, 1e-3));
        assert!(!is_close(f64::INFINITY, 3.0, 1e-3));
    }

    #[test]
    fn test_first_crossing_time() {
        let d = CrossingDetector::default();
        let t = d.find(&ramp(), 0.5, Signal::Voltage, Phase::Charging).unwrap();
        assert!((t - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_of_several_matches() {
        let s = TimeSeries::from_fn(linspace(0.0, 4.0, 5), |t| if t < 2.0 { 1.0 } else { 0.0 });
        let d = CrossingDetector::new(1e-1);
        let t = d.find(&s, 1.0, Signal::Current, Phase::Discharging).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_threshold_outside_range() {
        let d = CrossingDetector::default();
        let err = d
            .find(&ramp(), 1.5, Signal::Current, Phase::Discharging)
            .unwrap_err();
        assert!(matches!(
            err,
            RcError::CrossingNotFound {
                signal: Signal::Current,
                phase: Phase::Discharging,
                ..
            }
        ));
        assert!(d.find(&ramp(), -0.5, Signal::Voltage, Phase::Charging).is_err());
    }

    #[test]
    fn test_coarse_sampling_misses_threshold() {
        let d = CrossingDetector::default();
        assert!(d.find(&ramp(), 0.55, Signal::Voltage, Phase::Charging).is_err());
    }

    #[test]
    fn test_close_indices() {
        let values = [9.0, 10.5, 12.0, 9.5, 10.0];
        assert_eq!(close_indices(&values, 10.0, 1e-1), vec![0, 1, 3, 4]);
        assert!(close_indices(&values, 20.0, 1e-1).is_empty());
    }
}
