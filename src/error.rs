//! Error types for input validation and I/O.

use std::io;

use thiserror::Error;

/// Errors surfaced by the simulator before or around a run.
///
/// The step loop itself is pure arithmetic and never fails; every variant
/// here is either an input precondition or an I/O failure.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("input row {row}: expected {expected} columns, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("input row {row}: column {column} is not a finite number")]
    NonFinite { row: usize, column: usize },

    #[error("input row {row}: month {value} is not an integer in 1..=12")]
    InvalidMonth { row: usize, value: f64 },

    #[error("profile: {0}")]
    InvalidProfile(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T, E = SimError> = std::result::Result<T, E>;
