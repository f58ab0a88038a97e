//! CSV import of the per-step input series.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::sim::types::InputTable;

/// Column header expected in input files.
pub const INPUT_HEADER: &str = "generation,electrical_load,heat_load,month";

/// Raw input record; the month is read as a number and checked later.
#[derive(Debug, Deserialize)]
struct InputRecord {
    generation: f64,
    electrical_load: f64,
    heat_load: f64,
    month: f64,
}

/// Reads an input series from a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a record does not parse,
/// or the series violates an input precondition.
pub fn import_csv(path: &Path) -> Result<InputTable> {
    let file = File::open(path)?;
    read_csv(io::BufReader::new(file))
}

/// Reads an input series as CSV from any reader.
///
/// Columns are matched by header name, so their order in the file is free.
/// Nothing is returned unless every row is valid.
///
/// # Errors
///
/// Returns an error on the first malformed record or precondition violation.
pub fn read_csv(reader: impl Read) -> Result<InputTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut raw = Vec::new();
    for record in rdr.deserialize() {
        let r: InputRecord = record?;
        raw.push([r.generation, r.electrical_load, r.heat_load, r.month]);
    }
    InputTable::from_rows(&raw)
}
