//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::types::StepResult;

/// Aggregate key performance indicators derived from a complete run.
///
/// Computed post-hoc from `Vec<StepResult>` to ensure consistency between
/// step data and reported metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiReport {
    /// Number of simulated steps.
    pub steps: usize,
    /// Short-horizon level after the last step.
    pub final_short_level: f64,
    /// Long-horizon level after the last step.
    pub final_long_level: f64,
    /// Lowest long-horizon level reached.
    pub min_long_level: f64,
    /// Steps ending with a negative long-horizon level.
    pub negative_long_steps: usize,
    /// Total curtailed energy.
    pub waste_total: f64,
    /// Total energy diverted into conversion.
    pub conversion_total: f64,
    /// Steps with an active conversion.
    pub conversion_steps: usize,
    /// Total unmet deficit covered by the long-horizon store.
    pub withdrawal_total: f64,
    /// Total heat drawn from the long-horizon store.
    pub heat_total: f64,
    /// Short-horizon energy throughput (sum of |delta_short|).
    pub battery_throughput: f64,
    /// Short-horizon equivalent full cycles (throughput / 2*capacity).
    pub battery_equivalent_full_cycles: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `short_capacity` - Battery capacity for cycle calculation
    pub fn from_results(results: &[StepResult], short_capacity: f64) -> Self {
        let Some(last) = results.last() else {
            return Self {
                steps: 0,
                final_short_level: 0.0,
                final_long_level: 0.0,
                min_long_level: 0.0,
                negative_long_steps: 0,
                waste_total: 0.0,
                conversion_total: 0.0,
                conversion_steps: 0,
                withdrawal_total: 0.0,
                heat_total: 0.0,
                battery_throughput: 0.0,
                battery_equivalent_full_cycles: 0.0,
            };
        };

        let mut min_long = f64::INFINITY;
        let mut negative_long_steps = 0_usize;
        let mut conversion_total = 0.0_f64;
        let mut conversion_steps = 0_usize;
        let mut withdrawal_total = 0.0_f64;
        let mut heat_total = 0.0_f64;
        let mut throughput = 0.0_f64;

        for r in results {
            min_long = min_long.min(r.levels.long_level);
            if r.levels.long_level < 0.0 {
                negative_long_steps += 1;
            }
            if r.deltas.delta_conversion > 0.0 {
                conversion_steps += 1;
                conversion_total += r.deltas.delta_conversion;
            }
            withdrawal_total -= r.deltas.delta_long;
            heat_total += r.heat_load;
            throughput += r.deltas.delta_short.abs();
        }

        let cycles = if short_capacity > 0.0 {
            throughput / (2.0 * short_capacity)
        } else {
            0.0
        };

        Self {
            steps: results.len(),
            final_short_level: last.levels.short_level,
            final_long_level: last.levels.long_level,
            min_long_level: min_long,
            negative_long_steps,
            waste_total: last.levels.waste_total,
            conversion_total,
            conversion_steps,
            withdrawal_total,
            heat_total,
            battery_throughput: throughput,
            battery_equivalent_full_cycles: cycles,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Steps:                 {}", self.steps)?;
        writeln!(f, "Final battery level:   {:.3}", self.final_short_level)?;
        writeln!(f, "Final gas level:       {:.3}", self.final_long_level)?;
        writeln!(
            f,
            "Min gas level:         {:.3} ({} steps below zero)",
            self.min_long_level, self.negative_long_steps
        )?;
        writeln!(f, "Curtailed:             {:.3}", self.waste_total)?;
        writeln!(
            f,
            "Converted (P2G):       {:.3} over {} steps",
            self.conversion_total, self.conversion_steps
        )?;
        writeln!(f, "Withdrawn (G2P):       {:.3}", self.withdrawal_total)?;
        writeln!(f, "Heat drawn:            {:.3}", self.heat_total)?;
        write!(
            f,
            "Battery throughput:    {:.3} ({:.2} equiv. cycles)",
            self.battery_throughput, self.battery_equivalent_full_cycles
        )
    }
}
