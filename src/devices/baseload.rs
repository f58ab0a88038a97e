use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Profile, gaussian_noise, seasonal_weight};

/// A baseload generator that models daily electricity consumption patterns.
///
/// `BaseLoad` creates a sinusoidal demand pattern with configurable baseline,
/// amplitude, phase, and random noise to simulate typical daily load.
///
/// # Examples
///
/// ```
/// use hybrid_storage_sim::devices::baseload::BaseLoad;
/// use hybrid_storage_sim::devices::types::Profile;
///
/// let mut load = BaseLoad::new(
///     0.25, // base - average consumption per step
///     0.1,  // amp - daily variation
///     0.0,  // phase_rad
///     0.0,  // noise_std
///     96,   // steps_per_day - 15-minute resolution
///     42,   // seed
/// );
///
/// assert!(load.energy(48, 1) >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLoad {
    /// Baseline energy per step.
    pub base: f64,

    /// Amplitude of the sinusoidal variation.
    pub amp: f64,

    /// Phase offset of the sinusoidal pattern in radians.
    pub phase_rad: f64,

    /// Standard deviation of the Gaussian noise.
    pub noise_std: f64,

    /// Number of time steps per simulated day.
    pub steps_per_day: usize,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl BaseLoad {
    /// Creates a new baseload generator with the specified parameters.
    pub fn new(
        base: f64,
        amp: f64,
        phase_rad: f64,
        noise_std: f64,
        steps_per_day: usize,
        seed: u64,
    ) -> Self {
        Self {
            base,
            amp,
            phase_rad,
            noise_std,
            steps_per_day: steps_per_day.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for BaseLoad {
    /// Demand at step `timestep`. Electrical load has no seasonal term.
    fn energy(&mut self, timestep: usize, _month: u32) -> f64 {
        let day_pos = (timestep % self.steps_per_day) as f64 / self.steps_per_day as f64; // [0,1)
        let angle = 2.0 * std::f64::consts::PI * day_pos + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);

        let e = self.base + self.amp * angle.sin() + noise;
        e.max(0.0) // no negative demand
    }
}

/// Space and water heating demand, served from long-horizon storage.
///
/// Demand per step is flat within a day and rises from `summer` to `winter`
/// with the season.
#[derive(Debug, Clone, Copy)]
pub struct HeatLoad {
    /// Heat per step at midsummer (hot water only).
    pub summer: f64,
    /// Heat per step at midwinter.
    pub winter: f64,
}

impl HeatLoad {
    pub fn new(summer: f64, winter: f64) -> Self {
        Self {
            summer: summer.max(0.0),
            winter: winter.max(0.0),
        }
    }
}

impl Profile for HeatLoad {
    fn energy(&mut self, _timestep: usize, month: u32) -> f64 {
        let w = seasonal_weight(month);
        self.winter + (self.summer - self.winter) * w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_load_follows_sine() {
        let mut load = BaseLoad::new(1.0, 0.5, 0.0, 0.0, 4, 0);
        assert!((load.energy(0, 1) - 1.0).abs() < 1e-12);
        assert!((load.energy(1, 1) - 1.5).abs() < 1e-12);
        assert!((load.energy(3, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn load_is_never_negative() {
        let mut load = BaseLoad::new(0.1, 1.0, 0.0, 0.5, 96, 3);
        for t in 0..960 {
            assert!(load.energy(t, 5) >= 0.0);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let mut a = BaseLoad::new(0.3, 0.1, 1.2, 0.05, 96, 11);
        let mut b = BaseLoad::new(0.3, 0.1, 1.2, 0.05, 96, 11);
        for t in 0..96 {
            assert_eq!(a.energy(t, 1), b.energy(t, 1));
        }
    }

    #[test]
    fn heat_peaks_in_winter() {
        let mut heat = HeatLoad::new(0.05, 0.5);
        let jan = heat.energy(0, 1);
        let jul = heat.energy(0, 7);
        assert!(jan > jul);
        assert!(jul >= 0.05);
        assert!(jan <= 0.5);
    }
}
