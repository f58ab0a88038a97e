//! Common types and traits for storage devices and synthetic profile sources.

use rand::{Rng, rngs::StdRng};

use crate::sim::types::StorageState;

/// A reservoir whose level lives in the shared [`StorageState`].
///
/// Reservoirs hold only their immutable parameters; the level they act on
/// is threaded explicitly through every step.
pub trait Reservoir {
    /// Current level of this reservoir in `state`.
    fn level(&self, state: &StorageState) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}

/// Trait for synthetic sources producing energy per step.
pub trait Profile {
    /// Energy during step `timestep` of a day, for calendar `month`.
    fn energy(&mut self, timestep: usize, month: u32) -> f64;
}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Relative seasonal weight of a calendar month, `1.0` at midsummer and
/// `0.0` at midwinter (northern hemisphere).
pub fn seasonal_weight(month: u32) -> f64 {
    let angle = 2.0 * std::f64::consts::PI * (f64::from(month) - 6.5) / 12.0;
    0.5 * (1.0 + angle.cos())
}
