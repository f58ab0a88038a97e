use crate::devices::types::Reservoir;
use crate::sim::types::{MIN_RESERVE_FRACTION, StorageConfig, StorageState};

/// Long-horizon storage fed by power-to-gas and drawn by gas-to-power.
///
/// The store level is unbounded in both directions: deficits and heat demand
/// are always served from it, so a long run of shortfalls drives it negative.
/// Startup and shutdown dynamics of the conversion are not modelled.
#[derive(Debug, Clone, Copy)]
pub struct GasStore {
    /// Conversion throughput per step.
    pub rate: f64,
    /// Power-to-gas efficiency.
    pub forward_efficiency: f64,
    /// Gas-to-power efficiency.
    pub reverse_efficiency: f64,
    /// Short-horizon capacity, used for the reserve guard.
    short_capacity: f64,
}

impl GasStore {
    /// Creates a store from the shared storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            rate: config.long_rate(),
            forward_efficiency: config.forward_efficiency,
            reverse_efficiency: config.reverse_efficiency,
            short_capacity: config.short_capacity,
        }
    }

    /// Diverts part of `power_input` into conversion and returns the rest.
    ///
    /// A running conversion continues while `ctrl > 0`. A stopped one starts
    /// only at full control and only if the battery holds more than the
    /// reserve fraction of its capacity. When active, exactly
    /// `rate * ctrl` is diverted regardless of the sign of `power_input`;
    /// the battery covers any shortfall next.
    pub fn convert(&self, state: &mut StorageState, power_input: f64, ctrl: f64) -> f64 {
        if self.rate <= 0.0 {
            state.delta_conversion = 0.0;
            return power_input;
        }

        let reserve = self.short_capacity * MIN_RESERVE_FRACTION;
        let min_throughput = self.rate * ctrl;
        let previous = state.delta_conversion;

        let continuing = ctrl > 0.0 && previous > 0.0;
        let starting = ctrl == 1.0 && previous == 0.0 && state.short_level > reserve;

        let p2g = if continuing || starting {
            // Lower and upper bound coincide, pinning the result to min_throughput.
            (state.short_level - reserve)
                .max(min_throughput)
                .min(min_throughput)
        } else {
            0.0
        };

        state.delta_conversion = p2g.max(0.0);
        state.long_level += p2g * self.forward_efficiency;
        power_input - p2g
    }

    /// Covers an unmet deficit (`remainder < 0`) from the store.
    pub fn withdraw(&self, state: &mut StorageState, remainder: f64) {
        state.long_level += remainder * self.reverse_efficiency;
        state.delta_long = remainder;
    }

    /// Draws this step's heat demand.
    pub fn draw_heat(&self, state: &mut StorageState, heat_load: f64) {
        state.long_level -= heat_load;
    }
}

impl Reservoir for GasStore {
    fn level(&self, state: &StorageState) -> f64 {
        state.long_level
    }

    fn device_type(&self) -> &'static str {
        "GasStore"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn store(rate_per_hour: f64) -> GasStore {
        GasStore::new(&StorageConfig::new(10.0, rate_per_hour, 0.5, 0.8))
    }

    fn state(short_level: f64, delta_conversion: f64) -> StorageState {
        StorageState {
            short_level,
            delta_conversion,
            ..StorageState::default()
        }
    }

    #[test]
    fn fresh_start_needs_full_control_and_reserve() {
        let gas = store(4.0);
        let mut s = state(5.0, 0.0);
        let remainder = gas.convert(&mut s, 3.0, 1.0);
        assert_eq!(remainder, 2.0);
        assert_eq!(s.delta_conversion, 1.0);
        assert_eq!(s.long_level, 0.5);
    }

    #[test]
    fn no_fresh_start_at_reduced_control() {
        let gas = store(4.0);
        let mut s = state(5.0, 0.0);
        assert_eq!(gas.convert(&mut s, 3.0, 0.4), 3.0);
        assert_eq!(s.delta_conversion, 0.0);
        assert_eq!(s.long_level, 0.0);
    }

    #[test]
    fn no_fresh_start_below_reserve() {
        let gas = store(4.0);
        // reserve = 10 * 0.1 = 1.0; level must be strictly above it
        let mut s = state(1.0, 0.0);
        assert_eq!(gas.convert(&mut s, 3.0, 1.0), 3.0);
        assert_eq!(s.delta_conversion, 0.0);
    }

    #[test]
    fn continuation_ignores_reserve_guard() {
        let gas = store(4.0);
        let mut s = state(0.0, 1.0);
        let remainder = gas.convert(&mut s, 0.0, 0.4);
        assert_abs_diff_eq!(remainder, -0.4);
        assert_abs_diff_eq!(s.delta_conversion, 0.4);
        assert_abs_diff_eq!(s.long_level, 0.2);
    }

    #[test]
    fn stops_when_control_drops_to_zero() {
        let gas = store(4.0);
        let mut s = state(5.0, 1.0);
        assert_eq!(gas.convert(&mut s, 2.0, 0.0), 2.0);
        assert_eq!(s.delta_conversion, 0.0);
    }

    #[test]
    fn amount_is_pinned_to_throughput_even_with_large_headroom() {
        let gas = store(4.0);
        let mut s = state(9.0, 0.0);
        gas.convert(&mut s, 50.0, 1.0);
        assert_eq!(s.delta_conversion, 1.0);
    }

    #[test]
    fn zero_rate_is_a_no_op() {
        let gas = store(0.0);
        let mut s = state(9.0, 0.0);
        assert_eq!(gas.convert(&mut s, 5.0, 1.0), 5.0);
        assert_eq!(s.delta_conversion, 0.0);
        assert_eq!(s.long_level, 0.0);
    }

    #[test]
    fn withdrawal_applies_reverse_efficiency_without_floor() {
        let gas = store(4.0);
        let mut s = state(0.0, 0.0);
        gas.withdraw(&mut s, -4.0);
        assert_abs_diff_eq!(s.long_level, -3.2);
        assert_eq!(s.delta_long, -4.0);
    }

    #[test]
    fn heat_is_drawn_unconditionally() {
        let gas = store(4.0);
        let mut s = state(0.0, 0.0);
        gas.draw_heat(&mut s, 1.5);
        gas.draw_heat(&mut s, 1.5);
        assert_eq!(s.long_level, -3.0);
    }
}
