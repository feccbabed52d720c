//! rctune - RC powered-window optimizer
//!
//! Simulates a capacitor charged through a switch and discharged into a load,
//! and grid-searches capacitance or switch time for the longest window in
//! which the load sees both its minimum voltage and minimum current.
//!
//! # Usage
//!
//! ```bash
//! rctune simulate --waveform-csv run.csv
//! rctune capacitance --lo 0.01 --hi 10 --steps 1000
//! rctune switch-time --capacitance 2.2
//! rctune impulse --required 10 --sweep-csv sweep.csv
//! ```
//!
//! Set `RUST_LOG=rc_tune=debug` to see why individual candidates are skipped.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rc_tune::{
    circuit::{validate_parameters, validate_thresholds},
    error::Result,
    output,
    search::{BestSelection, TARGET_TOLERANCE},
    solver::{CROSSING_TOLERANCE, DEFAULT_SAMPLES_PER_PHASE},
    CircuitParameters, GridRange, GridSearch, SearchConfig, SearchOutcome, SweepParameter,
    Thresholds, TransientSolver,
};

/// Default capacitance grid (F)
const CAPACITANCE_RANGE: GridRange = GridRange {
    lo: 0.01,
    hi: 10.0,
    count: 1000,
};

/// Default switch-time grid (s)
const SWITCH_TIME_RANGE: GridRange = GridRange {
    lo: 0.01,
    hi: 20.0,
    count: 10_000,
};

/// RC charge/discharge simulator and powered-window optimizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a single charge/discharge run
    Simulate {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Write the waveforms to this CSV file
        #[arg(long, value_name = "PATH")]
        waveform_csv: Option<PathBuf>,

        /// Samples per charge or discharge phase
        #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_PHASE)]
        samples: usize,
    },

    /// Grid-search the capacitance for the longest powered window
    Capacitance(SweepArgs),

    /// Grid-search the switch time for the longest powered window
    SwitchTime(SweepArgs),

    /// Find the switch time whose powered window matches a required duration
    Impulse {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Required powered duration in seconds
        #[arg(long, default_value_t = 10.0)]
        required: f64,

        /// Relative tolerance when matching the required duration
        #[arg(long, default_value_t = TARGET_TOLERANCE)]
        target_tolerance: f64,
    },
}

/// Circuit values; unset values come from the command's preset.
#[derive(Args, Debug)]
struct CircuitArgs {
    /// Source voltage (V)
    #[arg(long)]
    source_voltage: Option<f64>,

    /// Load resistance (Ω)
    #[arg(long)]
    load_resistance: Option<f64>,

    /// Switch resistance (Ω)
    #[arg(long)]
    switch_resistance: Option<f64>,

    /// Capacitance (F)
    #[arg(long)]
    capacitance: Option<f64>,

    /// Time at which the switch opens (s)
    #[arg(long)]
    switch_time: Option<f64>,

    /// End of the simulated interval (s)
    #[arg(long)]
    end_time: Option<f64>,
}

impl CircuitArgs {
    fn resolve(&self, preset: CircuitParameters) -> Result<CircuitParameters> {
        let params = CircuitParameters {
            source_voltage: self.source_voltage.unwrap_or(preset.source_voltage),
            load_resistance: self.load_resistance.unwrap_or(preset.load_resistance),
            switch_resistance: self.switch_resistance.unwrap_or(preset.switch_resistance),
            capacitance: self.capacitance.unwrap_or(preset.capacitance),
            switch_time: self.switch_time.unwrap_or(preset.switch_time),
            end_time: self.end_time.unwrap_or(preset.end_time),
        };
        validate_parameters(&params)?;
        Ok(params)
    }
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Lower bound of the grid
    #[arg(long)]
    lo: Option<f64>,

    /// Upper bound of the grid
    #[arg(long)]
    hi: Option<f64>,

    /// Number of grid points
    #[arg(long)]
    steps: Option<usize>,

    /// Voltage threshold (V)
    #[arg(long, default_value_t = 3.0)]
    v_thresh: f64,

    /// Current threshold (A)
    #[arg(long, default_value_t = 0.15)]
    i_thresh: f64,

    /// Samples per charge or discharge phase
    #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_PHASE)]
    samples: usize,

    /// Relative tolerance for threshold crossings
    #[arg(long, default_value_t = CROSSING_TOLERANCE)]
    tolerance: f64,

    /// Never select the first accepted candidate
    #[arg(long)]
    legacy_selection: bool,

    /// Write the sweep curve to this CSV file
    #[arg(long, value_name = "PATH")]
    sweep_csv: Option<PathBuf>,

    /// Write the selected candidate's waveforms to this CSV file
    #[arg(long, value_name = "PATH")]
    waveform_csv: Option<PathBuf>,

    #[command(flatten)]
    circuit: CircuitArgs,
}

impl SweepArgs {
    fn config(&self) -> SearchConfig {
        let selection = if self.legacy_selection {
            BestSelection::AfterFirst
        } else {
            BestSelection::RunningMax
        };
        SearchConfig::new()
            .with_samples_per_phase(self.samples)
            .with_crossing_tolerance(self.tolerance)
            .with_selection(selection)
    }

    fn search(
        &self,
        parameter: SweepParameter,
        default_range: GridRange,
        config: SearchConfig,
    ) -> Result<GridSearch> {
        let base = self.circuit.resolve(CircuitParameters::sizing_preset())?;
        let thresholds = Thresholds::new(self.v_thresh, self.i_thresh);
        validate_thresholds(&thresholds)?;

        let range = GridRange::new(
            self.lo.unwrap_or(default_range.lo),
            self.hi.unwrap_or(default_range.hi),
            self.steps.unwrap_or(default_range.count),
        );

        Ok(GridSearch::with_config(base, thresholds, parameter, range, config))
    }

    fn export(&self, outcome: &SearchOutcome) -> Result<()> {
        if let Some(path) = &self.sweep_csv {
            output::write_to_file(path, |w| output::write_sweep_csv(&outcome.sweep, w))?;
        }
        if let Some(path) = &self.waveform_csv {
            output::write_to_file(path, |w| output::write_candidate_csv(&outcome.selected, w))?;
        }
        Ok(())
    }
}

fn report(outcome: &SearchOutcome) {
    let parameter = outcome.sweep.parameter;
    let selected = &outcome.selected;

    println!(
        "Accepted {} of {} candidates",
        outcome.sweep.entries.len(),
        outcome.sweep.evaluated
    );
    println!("Selected {}: {} {}", parameter, selected.value(), parameter.unit());
    println!("Time powered: {} s", selected.time_powered());
    println!("Volt seconds: {}", outcome.volt_seconds());
    println!("Amp seconds: {}", outcome.amp_seconds());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Simulate {
            circuit,
            waveform_csv,
            samples,
        } => {
            let params = circuit.resolve(CircuitParameters::default())?;
            let transient = TransientSolver::new(samples).solve(&params);

            let charge_end = transient.charge_voltage.last().map_or(f64::NAN, |(_, v)| v);
            let discharge_end = transient.discharge_voltage.last().map_or(f64::NAN, |(_, v)| v);
            println!("Charge asymptote: {} V", params.charge_asymptote());
            println!("Voltage at switch ({} s): {} V", params.switch_time, charge_end);
            println!("Voltage at end ({} s): {} V", params.end_time, discharge_end);

            if let Some(path) = waveform_csv {
                output::write_to_file(&path, |w| output::write_waveform_csv(&transient, w))?;
            }
        }

        Command::Capacitance(args) => {
            let config = args.config();
            let search = args.search(SweepParameter::Capacitance, CAPACITANCE_RANGE, config)?;
            let outcome = search.run()?;
            report(&outcome);
            args.export(&outcome)?;
        }

        Command::SwitchTime(args) => {
            let config = args.config();
            let search = args.search(SweepParameter::SwitchTime, SWITCH_TIME_RANGE, config)?;
            let outcome = search.run()?;
            report(&outcome);
            args.export(&outcome)?;
        }

        Command::Impulse {
            sweep,
            required,
            target_tolerance,
        } => {
            let config = sweep.config().with_target_tolerance(target_tolerance);
            let search = sweep.search(SweepParameter::SwitchTime, SWITCH_TIME_RANGE, config)?;
            let outcome = search.run_for_duration(required)?;
            report(&outcome);
            sweep.export(&outcome)?;
        }
    }

    Ok(())
}
