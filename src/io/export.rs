//! CSV export for simulated periods.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::PeriodResult;

/// Schema v1 column header for the per-period CSV export.
const HEADER: &str = "period,previous_capital,installed_capital,capital,investment,\
                      energy_price,fossil_fuel_price,fossil_fuel,renewable_capital,\
                      renewable_output,non_renewable_output,renewable_profit,\
                      non_renewable_profit";

/// Exports per-period results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per simulated period using
/// the schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `periods` - Per-period results of a simulation run
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(periods: &[PeriodResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(periods, buf)
}

/// Writes per-period results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(periods: &[PeriodResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in periods {
        wtr.write_record(&[
            r.period.to_string(),
            format!("{:.6}", r.previous_capital),
            format!("{:.6}", r.installed_capital),
            format!("{:.6}", r.capital),
            format!("{:.6}", r.investment),
            format!("{:.9}", r.energy_price),
            format!("{:.6}", r.fossil_fuel_price),
            format!("{:.6}", r.fossil_fuel),
            format!("{:.6}", r.renewable_capital),
            format!("{:.6}", r.renewable.output),
            format!("{:.6}", r.non_renewable.output),
            format!("{:.6}", r.renewable.profit),
            format!("{:.6}", r.non_renewable.profit),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
