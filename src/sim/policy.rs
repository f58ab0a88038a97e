//! Seasonal control policy for the long-horizon conversion.

use super::types::{DYNAMIC_RANGE_FLOOR, SUMMER_LAST_MONTH, is_summer_month};

/// Decides how hard long-horizon conversion may run in a step.
///
/// Outside the summer window the control is always `0`. Inside it, the
/// forecast row plus the current short-horizon level must stay strictly
/// above the cumulative throughput of running the conversion for every
/// prefix of the horizon: at full rate for control `1`, at the dynamic
/// range floor for the reduced level.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalPolicy {
    long_rate: f64,
}

impl SeasonalPolicy {
    /// Creates a policy for a per-step long-horizon rate.
    pub fn new(long_rate: f64) -> Self {
        Self { long_rate }
    }

    /// Computes the control signal, one of `0`, [`DYNAMIC_RANGE_FLOOR`] or `1`.
    ///
    /// # Arguments
    ///
    /// * `forecast_row` - Cumulative net-energy projection starting at this step
    /// * `short_level` - Current short-horizon level
    /// * `month` - Calendar month of this step
    pub fn control(&self, forecast_row: &[f64], short_level: f64, month: u32) -> f64 {
        if !is_summer_month(month) {
            return 0.0;
        }

        let mut full_rate_ok = month != SUMMER_LAST_MONTH;
        let mut throttled_ok = true;
        for (i, forecast) in forecast_row.iter().enumerate() {
            let full_rate_cumulative = (i + 1) as f64 * self.long_rate;
            let net_projected = forecast + short_level;
            if net_projected - full_rate_cumulative <= 0.0 {
                full_rate_ok = false;
            }
            if net_projected - full_rate_cumulative * DYNAMIC_RANGE_FLOOR <= 0.0 {
                throttled_ok = false;
            }
        }

        if full_rate_ok {
            1.0
        } else if throttled_ok {
            DYNAMIC_RANGE_FLOOR
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winter_months_never_activate() {
        let policy = SeasonalPolicy::new(1.0);
        let generous = vec![1_000.0; 16];
        for month in [1, 2, 11, 12] {
            assert_eq!(policy.control(&generous, 100.0, month), 0.0);
        }
    }

    #[test]
    fn full_rate_when_projection_covers_every_prefix() {
        let policy = SeasonalPolicy::new(1.0);
        // netProjected = [2, 3, 4] vs full-rate [1, 2, 3]
        assert_eq!(policy.control(&[1.0, 2.0, 3.0], 1.0, 6), 1.0);
    }

    #[test]
    fn no_new_full_rate_in_last_summer_month() {
        let policy = SeasonalPolicy::new(1.0);
        assert_eq!(
            policy.control(&[1.0, 2.0, 3.0], 1.0, SUMMER_LAST_MONTH),
            DYNAMIC_RANGE_FLOOR
        );
    }

    #[test]
    fn throttled_when_only_floor_is_covered() {
        let policy = SeasonalPolicy::new(1.0);
        // netProjected = [1, 1.5]; full-rate [1, 2] fails, floor [0.4, 0.8] holds.
        assert_eq!(policy.control(&[0.5, 1.0], 0.5, 5), DYNAMIC_RANGE_FLOOR);
    }

    #[test]
    fn equality_is_not_enough() {
        let policy = SeasonalPolicy::new(1.0);
        // netProjected[0] == 0.4 exactly matches the floor requirement.
        assert_eq!(policy.control(&[0.4], 0.0, 5), 0.0);
    }

    #[test]
    fn single_failing_entry_late_in_horizon_blocks_activation() {
        let policy = SeasonalPolicy::new(0.1);
        let mut row = vec![10.0; 20];
        row[19] = -20.0;
        assert_eq!(policy.control(&row, 1.0, 7), 0.0);
    }

    #[test]
    fn zero_rate_reduces_to_positive_projection_check() {
        let policy = SeasonalPolicy::new(0.0);
        assert_eq!(policy.control(&[0.0, 0.0], 0.5, 4), 1.0);
        assert_eq!(policy.control(&[0.0, 0.0], 0.0, 4), 0.0);
    }
}
