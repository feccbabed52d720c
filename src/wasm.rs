//! WASM bindings for rc_tune.
//!
//! This module provides JavaScript-friendly bindings so the optimizer can run
//! in a browser-based sizing calculator.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRcCircuit } from 'rc_tune';
//!
//! await init();
//!
//! // 4.8V source, 18Ω load, 1Ω switch, 1.6F, switch opens at 3.5s, 100s run
//! const circuit = new WasmRcCircuit(4.8, 18, 1, 1.6, 3.5, 100);
//! circuit.set_thresholds(3.0, 0.15);
//!
//! const best = circuit.optimize_capacitance(0.01, 10, 1000);
//! console.log(best.value, best.time_powered, best.volt_seconds);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{validate_parameters, validate_thresholds, CircuitParameters, Thresholds};
use crate::error::RcError;
use crate::search::{GridRange, GridSearch, SearchConfig, SearchOutcome, SweepParameter};
use crate::solver::TransientSolver;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: RcError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The selected candidate of a search.
#[wasm_bindgen]
pub struct WasmCandidate {
    value: f64,
    time_powered: f64,
    volt_seconds: f64,
    amp_seconds: f64,
    voltage: Vec<f64>,
    current: Vec<f64>,
    time: Vec<f64>,
}

impl From<SearchOutcome> for WasmCandidate {
    fn from(outcome: SearchOutcome) -> Self {
        let tr = &outcome.selected.transient;
        let time = [tr.charge_voltage.time(), tr.discharge_voltage.time()].concat();
        let voltage = [tr.charge_voltage.values(), tr.discharge_voltage.values()].concat();
        let current = [tr.charge_current.values(), tr.discharge_current.values()].concat();

        Self {
            value: outcome.selected.value(),
            time_powered: outcome.selected.time_powered(),
            volt_seconds: outcome.volt_seconds(),
            amp_seconds: outcome.amp_seconds(),
            voltage,
            current,
            time,
        }
    }
}

#[wasm_bindgen]
impl WasmCandidate {
    /// Value of the swept parameter.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Length of the powered window in seconds.
    #[wasm_bindgen(getter)]
    pub fn time_powered(&self) -> f64 {
        self.time_powered
    }

    #[wasm_bindgen(getter)]
    pub fn volt_seconds(&self) -> f64 {
        self.volt_seconds
    }

    #[wasm_bindgen(getter)]
    pub fn amp_seconds(&self) -> f64 {
        self.amp_seconds
    }

    /// Sample times of both phases, charging first.
    pub fn time(&self) -> Vec<f64> {
        self.time.clone()
    }

    /// Capacitor voltage at each sample time.
    pub fn voltage(&self) -> Vec<f64> {
        self.voltage.clone()
    }

    /// Load current at each sample time.
    pub fn current(&self) -> Vec<f64> {
        self.current.clone()
    }
}

/// WASM-compatible wrapper around a circuit and its thresholds.
#[wasm_bindgen]
pub struct WasmRcCircuit {
    params: CircuitParameters,
    thresholds: Thresholds,
    config: SearchConfig,
}

#[wasm_bindgen]
impl WasmRcCircuit {
    /// Create a circuit, rejecting non-finite or negative values.
    #[wasm_bindgen(constructor)]
    pub fn new(
        source_voltage: f64,
        load_resistance: f64,
        switch_resistance: f64,
        capacitance: f64,
        switch_time: f64,
        end_time: f64,
    ) -> Result<WasmRcCircuit, JsValue> {
        let params = CircuitParameters {
            source_voltage,
            load_resistance,
            switch_resistance,
            capacitance,
            switch_time,
            end_time,
        };
        validate_parameters(&params).map_err(to_js)?;

        Ok(WasmRcCircuit {
            params,
            thresholds: Thresholds::default(),
            config: SearchConfig::default(),
        })
    }

    /// Set the voltage (V) and current (A) thresholds.
    pub fn set_thresholds(&mut self, voltage: f64, current: f64) -> Result<(), JsValue> {
        let thresholds = Thresholds::new(voltage, current);
        validate_thresholds(&thresholds).map_err(to_js)?;
        self.thresholds = thresholds;
        Ok(())
    }

    /// Set the number of samples per phase.
    pub fn set_samples_per_phase(&mut self, samples: usize) {
        self.config = self.config.clone().with_samples_per_phase(samples);
    }

    /// Capacitor voltage over both phases.
    pub fn voltage(&self) -> Vec<f64> {
        let tr = TransientSolver::new(self.config.samples_per_phase).solve(&self.params);
        [tr.charge_voltage.values(), tr.discharge_voltage.values()].concat()
    }

    /// Grid-search capacitance over `[lo, hi]`.
    pub fn optimize_capacitance(
        &self,
        lo: f64,
        hi: f64,
        steps: usize,
    ) -> Result<WasmCandidate, JsValue> {
        self.search(SweepParameter::Capacitance, lo, hi, steps)
            .run()
            .map(WasmCandidate::from)
            .map_err(to_js)
    }

    /// Grid-search switch time over `[lo, hi]`.
    pub fn optimize_switch_time(
        &self,
        lo: f64,
        hi: f64,
        steps: usize,
    ) -> Result<WasmCandidate, JsValue> {
        self.search(SweepParameter::SwitchTime, lo, hi, steps)
            .run()
            .map(WasmCandidate::from)
            .map_err(to_js)
    }

    /// Switch time whose powered window matches `required` seconds.
    pub fn minimum_impulse(
        &self,
        lo: f64,
        hi: f64,
        steps: usize,
        required: f64,
    ) -> Result<WasmCandidate, JsValue> {
        self.search(SweepParameter::SwitchTime, lo, hi, steps)
            .run_for_duration(required)
            .map(WasmCandidate::from)
            .map_err(to_js)
    }
}

impl WasmRcCircuit {
    fn search(&self, parameter: SweepParameter, lo: f64, hi: f64, steps: usize) -> GridSearch {
        GridSearch::with_config(
            self.params,
            self.thresholds,
            parameter,
            GridRange::new(lo, hi, steps),
            self.config.clone(),
        )
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
