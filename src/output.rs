//! Results output formatting (CSV).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::circuit::{Phase, Signal};
use crate::error::{RcError, Result};
use crate::search::{CandidateResult, Sweep};
use crate::solver::Transient;

/// Write the sweep curve as CSV.
///
/// Format:
/// ```csv
/// capacitance,time_powered,voltage_charged,voltage_discharged,current_charged,current_discharged
/// 1.6,10.85,0.72,11.57,0.56,11.93
/// ```
pub fn write_sweep_csv<W: Write>(sweep: &Sweep, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "{},time_powered,voltage_charged,voltage_discharged,current_charged,current_discharged",
        sweep.parameter
    )?;
    for entry in &sweep.entries {
        let c = &entry.crossings;
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            entry.value,
            entry.time_powered,
            c.voltage_charged,
            c.voltage_discharged,
            c.current_charged,
            c.current_discharged
        )?;
    }
    Ok(())
}

/// Write both phases of a transient as CSV, charging rows first.
///
/// Format:
/// ```csv
/// phase,time,voltage,current
/// charging,0,0,0
/// discharging,5,4.72,0.236
/// ```
pub fn write_waveform_csv<W: Write>(transient: &Transient, writer: &mut W) -> Result<()> {
    writeln!(writer, "phase,time,voltage,current")?;
    for phase in [Phase::Charging, Phase::Discharging] {
        let voltage = transient.series(Signal::Voltage, phase);
        let current = transient.series(Signal::Current, phase);
        for ((t, v), (_, i)) in voltage.iter().zip(current.iter()) {
            writeln!(writer, "{},{},{},{}", phase, t, v, i)?;
        }
    }
    Ok(())
}

/// Write the waveforms of a selected candidate as CSV.
pub fn write_candidate_csv<W: Write>(candidate: &CandidateResult, writer: &mut W) -> Result<()> {
    write_waveform_csv(&candidate.transient, writer)
}

/// Create `path` and run `write` against a buffered writer for it.
pub fn write_to_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file_error = |source| RcError::FileWriteError {
        path: path.display().to_string(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(file_error)?);
    write(&mut writer)?;
    writer.flush().map_err(file_error)
}
