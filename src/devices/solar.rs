use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Profile, gaussian_noise, seasonal_weight};

/// A solar PV generator producing energy per step over daylight hours.
///
/// `SolarPv` creates a half-cosine shaped generation profile between sunrise
/// and sunset, scaled by a seasonal factor so winter output drops to
/// `winter_fraction` of the summer peak, with multiplicative Gaussian noise
/// for weather variation.
#[derive(Debug, Clone)]
pub struct SolarPv {
    /// Peak energy per step under ideal midsummer conditions.
    pub peak: f64,

    /// Number of time steps per simulated day.
    steps_per_day: usize,

    /// Time step index when sunrise occurs (inclusive).
    pub sunrise_idx: usize,

    /// Time step index when sunset occurs (exclusive).
    pub sunset_idx: usize,

    /// Fraction of the summer peak still reached in midwinter.
    pub winter_fraction: f64,

    /// Standard deviation of the Gaussian noise as a fraction of output.
    pub noise_std: f64,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl SolarPv {
    /// Creates a new solar PV generator with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `peak` - Peak energy per step at midsummer noon
    /// * `steps_per_day` - Number of steps per simulated day
    /// * `sunrise_idx` - Time step index when sunrise occurs (inclusive)
    /// * `sunset_idx` - Time step index when sunset occurs (exclusive)
    /// * `winter_fraction` - Midwinter output relative to midsummer
    /// * `noise_std` - Standard deviation of noise (e.g., 0.05 for +/-5% variation)
    /// * `seed` - Random seed for reproducible noise generation
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_idx >= sunset_idx` or `sunset_idx > steps_per_day`.
    pub fn new(
        peak: f64,
        steps_per_day: usize,
        sunrise_idx: usize,
        sunset_idx: usize,
        winter_fraction: f64,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        assert!(sunrise_idx < sunset_idx && sunset_idx <= steps_per_day);
        Self {
            peak: peak.max(0.0),
            steps_per_day,
            sunrise_idx,
            sunset_idx,
            winter_fraction: winter_fraction.clamp(0.0, 1.0),
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Half-cosine daylight shape in `[0, 1]` for a step of the day.
    fn daylight_frac(&self, t: usize) -> f64 {
        let t = t % self.steps_per_day;
        if t < self.sunrise_idx || t >= self.sunset_idx {
            return 0.0;
        }
        let span = (self.sunset_idx - self.sunrise_idx) as f64;
        let x = (t - self.sunrise_idx) as f64 + 0.5;
        (std::f64::consts::PI * x / span).sin()
    }

    fn season_factor(&self, month: u32) -> f64 {
        self.winter_fraction + (1.0 - self.winter_fraction) * seasonal_weight(month)
    }
}

impl Profile for SolarPv {
    /// Generated energy at step `timestep`; zero at night, never negative.
    fn energy(&mut self, timestep: usize, month: u32) -> f64 {
        let frac = self.daylight_frac(timestep);
        if frac <= 0.0 {
            return 0.0;
        }

        let noise_mult = 1.0 + gaussian_noise(&mut self.rng, self.noise_std);
        let e = self.peak * frac * self.season_factor(month) * noise_mult;
        e.max(0.0)
    }
}
