//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use hybrid_storage_sim::config::ProfileConfig;
use hybrid_storage_sim::profile::synthesize;
use hybrid_storage_sim::sim::types::{InputTable, StorageConfig};

/// Battery-only configuration (no long-horizon store), lossless.
pub fn battery_only(short_capacity: f64) -> StorageConfig {
    StorageConfig::new(short_capacity, 0.0, 1.0, 1.0)
}

/// Default hybrid configuration (20 capacity, 0.8/h conversion).
pub fn default_hybrid() -> StorageConfig {
    StorageConfig::new(20.0, 0.8, 0.6, 0.5)
}

/// Builds an input table from `[generation, electrical_load, heat_load, month]` rows.
pub fn table(rows: &[[f64; 4]]) -> InputTable {
    InputTable::from_rows(rows).expect("fixture rows are valid")
}

/// `n` identical rows.
pub fn constant_rows(n: usize, row: [f64; 4]) -> InputTable {
    table(&vec![row; n])
}

/// Synthetic series of `days` days starting at `start_month`.
pub fn synthetic(days: usize, start_month: u32, seed: u64) -> InputTable {
    let cfg = ProfileConfig {
        days,
        start_month,
        seed,
        ..ProfileConfig::default()
    };
    synthesize(&cfg).expect("default profile is finite")
}
