//! CSV export of the two output tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::types::{StorageDeltas, StorageLevels};

/// Column header of the cumulative state table.
const LEVELS_HEADER: &str = "timestep,short_level,long_level,waste_total";

/// Column header of the per-step delta table.
const DELTAS_HEADER: &str = "timestep,delta_short,delta_long,delta_waste,delta_conversion";

/// Exports the cumulative state table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_levels_csv(levels: &[StorageLevels], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_levels_csv(levels, io::BufWriter::new(file))
}

/// Exports the per-step delta table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_deltas_csv(deltas: &[StorageDeltas], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_deltas_csv(deltas, io::BufWriter::new(file))
}

/// Writes the cumulative state table as CSV to any writer.
///
/// One header row followed by one row per step. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_levels_csv(levels: &[StorageLevels], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LEVELS_HEADER.split(','))?;

    for (t, r) in levels.iter().enumerate() {
        wtr.write_record(&[
            t.to_string(),
            format!("{:.6}", r.short_level),
            format!("{:.6}", r.long_level),
            format!("{:.6}", r.waste_total),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the per-step delta table as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_deltas_csv(deltas: &[StorageDeltas], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DELTAS_HEADER.split(','))?;

    for (t, r) in deltas.iter().enumerate() {
        wtr.write_record(&[
            t.to_string(),
            format!("{:.6}", r.delta_short),
            format!("{:.6}", r.delta_long),
            format!("{:.6}", r.delta_waste),
            format!("{:.6}", r.delta_conversion),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
