//! Core simulation types: storage configuration, input series, state, and step records.

use std::fmt;

use crate::error::SimError;

/// Number of input samples per hour (15-minute resolution).
pub const SAMPLES_PER_HOUR: usize = 4;

/// Length of the forward-looking forecast window in days.
pub const FORECAST_HORIZON_DAYS: usize = 3;

/// Minimum throttled activation level of the long-horizon conversion.
pub const DYNAMIC_RANGE_FLOOR: f64 = 0.4;

/// Fraction of the short-horizon capacity kept in reserve before a fresh
/// conversion start is allowed.
pub const MIN_RESERVE_FRACTION: f64 = 0.1;

/// First calendar month (inclusive) in which long-horizon conversion may activate.
pub const SUMMER_FIRST_MONTH: u32 = 3;

/// Last calendar month (inclusive) in which long-horizon conversion may activate.
pub const SUMMER_LAST_MONTH: u32 = 10;

/// Number of columns in a raw input row.
pub const INPUT_COLUMNS: usize = 4;

/// Forecast horizon in steps.
pub const fn forecast_horizon_steps() -> usize {
    SAMPLES_PER_HOUR * 24 * FORECAST_HORIZON_DAYS
}

/// Returns `true` if `month` lies inside the summer activation window.
pub fn is_summer_month(month: u32) -> bool {
    (SUMMER_FIRST_MONTH..=SUMMER_LAST_MONTH).contains(&month)
}

/// Immutable storage configuration.
///
/// Values are accepted as given; out-of-range parameters produce physically
/// implausible but well-defined simulations.
///
/// # Examples
///
/// ```
/// use hybrid_storage_sim::sim::types::StorageConfig;
///
/// let cfg = StorageConfig::new(10.0, 8.0, 0.6, 0.5);
/// assert_eq!(cfg.long_rate(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageConfig {
    /// Maximum short-horizon reservoir level (energy units).
    pub short_capacity: f64,
    /// Nominal long-horizon conversion throughput per hour.
    pub long_rate_per_hour: f64,
    /// Multiplier applied when converting surplus into long-horizon storage.
    pub forward_efficiency: f64,
    /// Multiplier applied when withdrawing long-horizon storage for deficits.
    pub reverse_efficiency: f64,
}

impl StorageConfig {
    /// Creates a new storage configuration.
    ///
    /// # Arguments
    ///
    /// * `short_capacity` - Short-horizon (battery) capacity
    /// * `long_rate_per_hour` - Long-horizon conversion throughput per hour
    /// * `forward_efficiency` - Power-to-gas efficiency
    /// * `reverse_efficiency` - Gas-to-power efficiency
    pub fn new(
        short_capacity: f64,
        long_rate_per_hour: f64,
        forward_efficiency: f64,
        reverse_efficiency: f64,
    ) -> Self {
        Self {
            short_capacity,
            long_rate_per_hour,
            forward_efficiency,
            reverse_efficiency,
        }
    }

    /// Long-horizon conversion throughput per step.
    pub fn long_rate(&self) -> f64 {
        self.long_rate_per_hour / SAMPLES_PER_HOUR as f64
    }

    /// Returns `true` when a long-horizon store is configured at all.
    pub fn has_long_storage(&self) -> bool {
        self.long_rate() > 0.0
    }
}

/// One step of input: energy per step and the calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRow {
    /// Generated energy during the step.
    pub generation: f64,
    /// Electrical load during the step.
    pub electrical_load: f64,
    /// Heat load during the step, always drawn from long-horizon storage.
    pub heat_load: f64,
    /// Calendar month, 1..=12.
    pub month: u32,
}

impl InputRow {
    /// Generation minus electrical load.
    pub fn mismatch(&self) -> f64 {
        self.generation - self.electrical_load
    }
}

/// Validated, rectangular input series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    rows: Vec<InputRow>,
}

impl InputTable {
    /// Wraps already-typed rows, checking every value for finiteness and
    /// every month for range.
    ///
    /// # Errors
    ///
    /// Returns the first precondition violation found.
    pub fn new(rows: Vec<InputRow>) -> Result<Self, SimError> {
        for (idx, row) in rows.iter().enumerate() {
            let values = [row.generation, row.electrical_load, row.heat_load];
            if let Some(column) = values.iter().position(|v| !v.is_finite()) {
                return Err(SimError::NonFinite { row: idx, column });
            }
            if !(1..=12).contains(&row.month) {
                return Err(SimError::InvalidMonth {
                    row: idx,
                    value: f64::from(row.month),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Builds a table from raw `[generation, electrical_load, heat_load, month]` rows.
    ///
    /// # Errors
    ///
    /// Fails fast on the first row with the wrong column count, a non-finite
    /// value, or a month that is not an integer in 1..=12.
    pub fn from_rows<R: AsRef<[f64]>>(raw: &[R]) -> Result<Self, SimError> {
        let mut rows = Vec::with_capacity(raw.len());
        for (idx, r) in raw.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != INPUT_COLUMNS {
                return Err(SimError::RaggedRow {
                    row: idx,
                    expected: INPUT_COLUMNS,
                    found: r.len(),
                });
            }
            if let Some(column) = r.iter().position(|v| !v.is_finite()) {
                return Err(SimError::NonFinite { row: idx, column });
            }
            rows.push(InputRow {
                generation: r[0],
                electrical_load: r[1],
                heat_load: r[2],
                month: month_from_f64(idx, r[3])?,
            });
        }
        Ok(Self { rows })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in step order.
    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    /// Per-step mismatch (generation minus electrical load).
    pub fn mismatch(&self) -> Vec<f64> {
        self.rows.iter().map(InputRow::mismatch).collect()
    }
}

fn month_from_f64(row: usize, value: f64) -> Result<u32, SimError> {
    if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
        return Err(SimError::InvalidMonth { row, value });
    }
    // Range checked above, so the cast is exact.
    Ok(value as u32)
}

/// Mutable reservoir state threaded through every step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StorageState {
    /// Short-horizon reservoir level, kept within `[0, short_capacity]`.
    pub short_level: f64,
    /// Long-horizon reservoir level. Unbounded; may go negative.
    pub long_level: f64,
    /// Cumulative curtailed energy.
    pub waste_total: f64,
    /// Short-horizon change during the last step.
    pub delta_short: f64,
    /// Unmet deficit withdrawn from long-horizon storage during the last step.
    pub delta_long: f64,
    /// Curtailment during the last step.
    pub delta_waste: f64,
    /// Energy diverted to conversion during the last step.
    pub delta_conversion: f64,
}

impl StorageState {
    /// Snapshot of the cumulative levels.
    pub fn levels(&self) -> StorageLevels {
        StorageLevels {
            short_level: self.short_level,
            long_level: self.long_level,
            waste_total: self.waste_total,
        }
    }

    /// Snapshot of the last-step deltas.
    pub fn deltas(&self) -> StorageDeltas {
        StorageDeltas {
            delta_short: self.delta_short,
            delta_long: self.delta_long,
            delta_waste: self.delta_waste,
            delta_conversion: self.delta_conversion,
        }
    }
}

/// Row of the cumulative state output table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageLevels {
    pub short_level: f64,
    pub long_level: f64,
    pub waste_total: f64,
}

/// Row of the per-step delta output table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageDeltas {
    pub delta_short: f64,
    pub delta_long: f64,
    pub delta_waste: f64,
    pub delta_conversion: f64,
}

/// The two output tables of a run, each with one row per input step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOutput {
    pub levels: Vec<StorageLevels>,
    pub deltas: Vec<StorageDeltas>,
}

impl SimulationOutput {
    /// Splits complete step records into the two output tables.
    pub fn from_results(results: &[StepResult]) -> Self {
        Self {
            levels: results.iter().map(|r| r.levels).collect(),
            deltas: results.iter().map(|r| r.deltas).collect(),
        }
    }

    /// Number of rows in each table.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the run produced no rows.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Complete record of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Step index.
    pub timestep: usize,
    /// Calendar month of the step.
    pub month: u32,
    /// Generation minus electrical load.
    pub mismatch: f64,
    /// Control signal applied to the long-horizon conversion.
    pub ctrl: f64,
    /// Heat drawn from long-horizon storage.
    pub heat_load: f64,
    /// Levels after the step.
    pub levels: StorageLevels,
    /// Deltas of the step.
    pub deltas: StorageDeltas,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>6} (m={:>2}) | mismatch={:>8.3}  ctrl={:.1} | short={:>8.3}  \
             long={:>10.3}  waste={:>10.3} | d_short={:>7.3}  d_long={:>7.3}  \
             d_waste={:>7.3}  p2g={:>6.3}",
            self.timestep,
            self.month,
            self.mismatch,
            self.ctrl,
            self.levels.short_level,
            self.levels.long_level,
            self.levels.waste_total,
            self.deltas.delta_short,
            self.deltas.delta_long,
            self.deltas.delta_waste,
            self.deltas.delta_conversion,
        )
    }
}
