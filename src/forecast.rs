//! Forward-looking net-energy forecast driving long-horizon activation.

use crate::sim::types::{InputTable, StorageConfig, forecast_horizon_steps};

/// Cumulative net-energy projection, one row per input step.
///
/// Row `t` holds the running sum of `generation - electrical_load` over steps
/// `t, t+1, ..., t+horizon-1`. Steps past the end of the series count as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastMatrix {
    rows: usize,
    horizon: usize,
    values: Vec<f64>,
}

impl ForecastMatrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, horizon: usize) -> Self {
        Self {
            rows,
            horizon,
            values: vec![0.0; rows * horizon],
        }
    }

    /// Computes the projection for a per-step mismatch series.
    ///
    /// Each row is accumulated strictly left to right so results are
    /// reproducible to the last bit.
    pub fn from_mismatch(mismatch: &[f64], horizon: usize) -> Self {
        let rows = mismatch.len();
        let mut values = Vec::with_capacity(rows * horizon);
        for t in 0..rows {
            let mut acc = 0.0_f64;
            for i in 0..horizon {
                // Zero padding past the end of the series.
                acc += mismatch.get(t + i).copied().unwrap_or(0.0);
                values.push(acc);
            }
        }
        Self {
            rows,
            horizon,
            values,
        }
    }

    /// Number of rows (equals the input length).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Window length in steps.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Forecast row for step `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= self.rows()`.
    pub fn row(&self, t: usize) -> &[f64] {
        let start = t * self.horizon;
        &self.values[start..start + self.horizon]
    }
}

/// Computes the whole forecast once, before the step loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizonForecast;

impl HorizonForecast {
    /// Produces the forecast for `input` under `config`.
    ///
    /// Without a long-horizon store the projection is never consulted for
    /// anything but a no-op, so the computation is skipped and a zero matrix
    /// of the same shape is returned.
    pub fn forecast(&self, input: &InputTable, config: &StorageConfig) -> ForecastMatrix {
        let horizon = forecast_horizon_steps();
        if !config.has_long_storage() {
            return ForecastMatrix::zeros(input.len(), horizon);
        }
        ForecastMatrix::from_mismatch(&input.mismatch(), horizon)
    }
}
