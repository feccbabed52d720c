//! Grid search over a single circuit parameter.

use tracing::{debug, info, info_span, warn};

use crate::circuit::{CircuitParameters, Thresholds};
use crate::error::{RcError, Result};
use crate::solver::{CrossingDetector, TransientSolver};

use super::{
    CandidateResult, CandidateSummary, Crossings, GridRange, SearchConfig, Sweep, SweepParameter,
};

/// The selected candidate of a search, with the sweep it was picked from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub selected: CandidateResult,
    pub sweep: Sweep,
    pub thresholds: Thresholds,
}

impl SearchOutcome {
    /// Volt-seconds delivered at threshold during the powered window.
    pub fn volt_seconds(&self) -> f64 {
        self.thresholds.volt_seconds(self.selected.time_powered())
    }

    /// Amp-seconds delivered at threshold during the powered window.
    pub fn amp_seconds(&self) -> f64 {
        self.thresholds.amp_seconds(self.selected.time_powered())
    }
}

/// Evaluates every point of a [`GridRange`] for one [`SweepParameter`].
///
/// For each value the circuit is solved, the four threshold crossings are
/// located, and the powered window is computed. Candidates with a missing
/// crossing or an invalid window are skipped; the search continues.
#[derive(Debug, Clone)]
pub struct GridSearch {
    base: CircuitParameters,
    thresholds: Thresholds,
    parameter: SweepParameter,
    range: GridRange,
    solver: TransientSolver,
    detector: CrossingDetector,
    config: SearchConfig,
}

impl GridSearch {
    /// Create a search with default configuration.
    pub fn new(
        base: CircuitParameters,
        thresholds: Thresholds,
        parameter: SweepParameter,
        range: GridRange,
    ) -> Self {
        Self::with_config(base, thresholds, parameter, range, SearchConfig::default())
    }

    /// Create a search with custom configuration.
    pub fn with_config(
        base: CircuitParameters,
        thresholds: Thresholds,
        parameter: SweepParameter,
        range: GridRange,
        config: SearchConfig,
    ) -> Self {
        Self {
            base,
            thresholds,
            parameter,
            range,
            solver: TransientSolver::new(config.samples_per_phase),
            detector: CrossingDetector::new(config.crossing_tolerance),
            config,
        }
    }

    /// Solve and score the circuit with the swept parameter set to `value`.
    pub fn evaluate(&self, value: f64) -> Result<CandidateResult> {
        let params = self.parameter.apply(&self.base, value);
        let transient = self.solver.solve(&params);
        let crossings = Crossings::locate(&transient, &self.thresholds, &self.detector)?;
        let time_powered = crossings.time_powered()?;

        Ok(CandidateResult {
            summary: CandidateSummary {
                value,
                time_powered,
                crossings,
            },
            params,
            transient,
        })
    }

    fn summarize(&self, value: f64) -> Result<CandidateSummary> {
        self.evaluate(value).map(|c| c.summary)
    }

    #[cfg(feature = "parallel")]
    fn summarize_all(&self, values: &[f64]) -> Vec<Result<CandidateSummary>> {
        use rayon::prelude::*;
        values.par_iter().map(|&v| self.summarize(v)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn summarize_all(&self, values: &[f64]) -> Vec<Result<CandidateSummary>> {
        values.iter().map(|&v| self.summarize(v)).collect()
    }

    /// Evaluate the whole grid and collect the accepted candidates.
    pub fn sweep(&self) -> Result<Sweep> {
        let values = self.range.values()?;
        let mut entries = Vec::new();
        let mut skipped = 0;

        for (value, result) in values.iter().zip(self.summarize_all(&values)) {
            match result {
                Ok(summary) => entries.push(summary),
                Err(e) if e.is_candidate_rejection() => {
                    debug!(value, reason = %e, "skipping candidate");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(accepted = entries.len(), skipped, "sweep complete");

        Ok(Sweep {
            parameter: self.parameter,
            entries,
            evaluated: values.len(),
            skipped,
        })
    }

    /// Find the candidate with the longest powered window.
    pub fn run(&self) -> Result<SearchOutcome> {
        let _span = self.span().entered();
        let sweep = self.sweep()?;

        let Some(index) = sweep.best_index(self.config.selection) else {
            warn!(evaluated = sweep.evaluated, "no candidate selected");
            return Err(self.empty_result(&sweep));
        };

        self.select(sweep, index)
    }

    /// Find the candidate whose powered window matches `required` seconds.
    ///
    /// Of all accepted candidates within the target tolerance of `required`,
    /// the one at the median position of the sweep is chosen.
    pub fn run_for_duration(&self, required: f64) -> Result<SearchOutcome> {
        let _span = self.span().entered();
        let sweep = self.sweep()?;

        if sweep.is_empty() {
            warn!(evaluated = sweep.evaluated, "no candidate accepted");
            return Err(self.empty_result(&sweep));
        }

        let tolerance = self.config.target_tolerance;
        let index = sweep
            .matching_index(required, tolerance)
            .ok_or(RcError::TargetNotReached {
                required,
                tolerance,
            })?;

        self.select(sweep, index)
    }

    fn select(&self, sweep: Sweep, index: usize) -> Result<SearchOutcome> {
        let selected = self.evaluate(sweep.entries[index].value)?;
        info!(
            value = selected.value(),
            time_powered = selected.time_powered(),
            "selected candidate"
        );

        Ok(SearchOutcome {
            selected,
            sweep,
            thresholds: self.thresholds,
        })
    }

    fn empty_result(&self, sweep: &Sweep) -> RcError {
        RcError::EmptyResult {
            parameter: self.parameter.to_string(),
            evaluated: sweep.evaluated,
        }
    }

    fn span(&self) -> tracing::Span {
        info_span!(
            "grid_search",
            parameter = %self.parameter,
            lo = self.range.lo,
            hi = self.range.hi,
            count = self.range.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::BestSelection;

    fn capacitance_search(range: GridRange) -> GridSearch {
        GridSearch::new(
            CircuitParameters::sizing_preset(),
            Thresholds::default(),
            SweepParameter::Capacitance,
            range,
        )
    }

    #[test]
    fn test_evaluate_accepted_candidate() {
        let search = capacitance_search(GridRange::new(1.6, 1.6, 1));
        let c = search.evaluate(1.6).unwrap();
        assert_eq!(c.params.capacitance, 1.6);
        assert_eq!(c.value(), 1.6);
        let x = c.crossings();
        assert!(x.voltage_charged < 3.5);
        assert!(x.voltage_discharged > 3.5);
        assert!(c.time_powered() > 0.0);
        assert!(c.time_powered() <= x.voltage_interval());
        assert!(c.time_powered() <= x.current_interval());
    }

    #[test]
    fn test_unreachable_threshold_is_empty_result() {
        let search = GridSearch::new(
            CircuitParameters::sizing_preset(),
            Thresholds::new(10.0, 0.15),
            SweepParameter::Capacitance,
            GridRange::new(0.5, 2.0, 20),
        );
        let err = search.run().unwrap_err();
        assert!(matches!(
            err,
            RcError::EmptyResult { evaluated: 20, ref parameter } if parameter == "capacitance"
        ));
    }

    #[test]
    fn test_single_point_grid() {
        let search = capacitance_search(GridRange::new(1.6, 1.6, 1));
        let outcome = search.run().unwrap();
        assert_eq!(outcome.sweep.entries.len(), 1);
        assert_eq!(outcome.selected.value(), 1.6);
        assert_eq!(outcome.selected, search.evaluate(1.6).unwrap());

        let legacy = GridSearch::with_config(
            CircuitParameters::sizing_preset(),
            Thresholds::default(),
            SweepParameter::Capacitance,
            GridRange::new(1.6, 1.6, 1),
            SearchConfig::new().with_selection(BestSelection::AfterFirst),
        );
        assert!(matches!(legacy.run(), Err(RcError::EmptyResult { .. })));
    }

    #[test]
    fn test_selected_candidate_dominates_sweep() {
        let outcome = capacitance_search(GridRange::new(0.01, 10.0, 200)).run().unwrap();
        let best = outcome.selected.time_powered();
        let first_max = outcome
            .sweep
            .entries
            .iter()
            .find(|e| e.time_powered == best)
            .unwrap();
        assert_eq!(first_max.value, outcome.selected.value());
        assert!(outcome.sweep.time_powered().iter().all(|&tp| tp <= best));
        assert_eq!(
            outcome.sweep.entries.len() + outcome.sweep.skipped,
            outcome.sweep.evaluated
        );
        assert!((outcome.volt_seconds() - 3.0 * best).abs() < 1e-12);
        assert!((outcome.amp_seconds() - 0.15 * best).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_is_ascending() {
        let sweep = capacitance_search(GridRange::new(0.01, 10.0, 100)).sweep().unwrap();
        for w in sweep.entries.windows(2) {
            assert!(w[0].value < w[1].value);
        }
    }

    #[test]
    fn test_degenerate_range_evaluates_once() {
        let outcome = capacitance_search(GridRange::new(1.6, 1.6, 5)).run().unwrap();
        assert_eq!(outcome.sweep.evaluated, 1);
        assert_eq!(outcome.sweep.entries.len(), 1);
        assert_eq!(outcome.selected.value(), 1.6);
    }

    #[test]
    fn test_target_tolerance_widens_match() {
        let range = GridRange::new(0.01, 10.0, 200);
        let sweep = capacitance_search(range).sweep().unwrap();
        let best = sweep
            .time_powered()
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        // 20% above the longest window: out of reach at 10%, within 50%
        let required = best * 1.2;

        assert!(matches!(
            capacitance_search(range).run_for_duration(required),
            Err(RcError::TargetNotReached { tolerance, .. }) if tolerance == 1e-1
        ));

        let wide = GridSearch::with_config(
            CircuitParameters::sizing_preset(),
            Thresholds::default(),
            SweepParameter::Capacitance,
            range,
            SearchConfig::new().with_target_tolerance(0.5),
        );
        let outcome = wide.run_for_duration(required).unwrap();
        assert!((outcome.selected.time_powered() - required).abs() <= 0.5 * required + 1e-8);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_sweep_matches_sequential() {
        let search = capacitance_search(GridRange::new(0.01, 10.0, 1000));
        let values = GridRange::new(0.01, 10.0, 1000).values().unwrap();

        let parallel = search.summarize_all(&values);
        let sequential: Vec<_> = values.iter().map(|&v| search.summarize(v)).collect();
        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            match (p, s) {
                (Ok(p), Ok(s)) => assert_eq!(p, s),
                (Err(p), Err(s)) => assert_eq!(p.to_string(), s.to_string()),
                _ => panic!("parallel and sequential results disagree"),
            }
        }

        let entries: Vec<_> = sequential.into_iter().filter_map(|r| r.ok()).collect();
        let sweep = search.sweep().unwrap();
        assert_eq!(sweep.entries, entries);
        assert_eq!(sweep.skipped, values.len() - entries.len());

        let reference = Sweep {
            parameter: SweepParameter::Capacitance,
            skipped: values.len() - entries.len(),
            evaluated: values.len(),
            entries,
        };
        assert_eq!(sweep, reference);
        for selection in [BestSelection::RunningMax, BestSelection::AfterFirst] {
            assert_eq!(sweep.best_index(selection), reference.best_index(selection));
        }
    }

    #[test]
    fn test_invalid_grid() {
        let search = capacitance_search(GridRange::new(0.01, 10.0, 0));
        assert!(matches!(search.run(), Err(RcError::InvalidGrid { .. })));
    }

    #[test]
    fn test_target_not_reached() {
        let search = capacitance_search(GridRange::new(0.5, 2.0, 50));
        assert!(matches!(
            search.run_for_duration(1.0e4),
            Err(RcError::TargetNotReached { .. })
        ));
    }
}
