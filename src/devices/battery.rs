use crate::devices::types::Reservoir;
use crate::sim::types::StorageState;

/// Short-horizon storage (battery) absorbing the per-step mismatch.
///
/// `Battery` charges on a positive net energy difference and discharges on a
/// negative one, bounded by the headroom `capacity - level` and by the
/// stored energy respectively. Charging and discharging are lossless.
///
/// # Sign Convention
/// - Positive delta: charging (surplus stored)
/// - Negative delta: discharging (deficit covered)
#[derive(Debug, Clone, Copy)]
pub struct Battery {
    /// Maximum stored energy.
    pub capacity: f64,
}

impl Battery {
    /// Creates a new battery with the given capacity.
    pub fn new(capacity: f64) -> Self {
        Self { capacity }
    }

    /// Charges or discharges against `net_energy_diff` and returns the part
    /// the battery could not absorb or supply.
    ///
    /// Updates `short_level` and `delta_short` in `state`. The level stays
    /// within `[0, capacity]` as long as it started there.
    pub fn allocate(&self, state: &mut StorageState, net_energy_diff: f64) -> f64 {
        let delta_charge = if net_energy_diff > 0.0 {
            net_energy_diff.min(self.capacity - state.short_level)
        } else {
            net_energy_diff.max(-state.short_level)
        };

        state.short_level += delta_charge;
        state.delta_short = delta_charge;
        net_energy_diff - delta_charge
    }
}

impl Reservoir for Battery {
    fn level(&self, state: &StorageState) -> f64 {
        state.short_level
    }

    fn device_type(&self) -> &'static str {
        "Battery"
    }
}
