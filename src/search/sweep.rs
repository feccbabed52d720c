//! The accepted points of a grid search, in scan order.

use crate::solver::close_indices;

use super::{BestSelection, CandidateSummary, SweepParameter};

/// Time powered against parameter value over every accepted candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    /// Parameter that was swept
    pub parameter: SweepParameter,
    /// Accepted candidates, ascending by parameter value
    pub entries: Vec<CandidateSummary>,
    /// Number of grid points evaluated
    pub evaluated: usize,
    /// Number of grid points skipped
    pub skipped: usize,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time powered of each accepted candidate.
    pub fn time_powered(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.time_powered).collect()
    }

    /// Index of the best entry under `selection`.
    ///
    /// A candidate is selected when its time powered is strictly greater than
    /// every earlier entry, so the first of equal maxima wins.
    pub fn best_index(&self, selection: BestSelection) -> Option<usize> {
        let mut running_max: Option<f64> = None;
        let mut best = None;

        for (i, entry) in self.entries.iter().enumerate() {
            let improves = match running_max {
                None => selection == BestSelection::RunningMax,
                Some(max) => entry.time_powered > max,
            };
            if improves {
                best = Some(i);
            }
            let tp = entry.time_powered;
            running_max = Some(running_max.map_or(tp, |m| m.max(tp)));
        }

        best
    }

    /// Index of the median entry whose time powered is close to `required`.
    pub fn matching_index(&self, required: f64, rtol: f64) -> Option<usize> {
        median_index(&close_indices(&self.time_powered(), required, rtol))
    }
}

/// Median of ascending indices, truncated toward zero.
///
/// For an even count this is the floor of the mean of the two middle values.
pub fn median_index(indices: &[usize]) -> Option<usize> {
    let n = indices.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(indices[n / 2]),
        _ => Some((indices[n / 2 - 1] + indices[n / 2]) / 2),
    }
}
