//! Seeded synthetic input series for runs without a data file.

use crate::config::ProfileConfig;
use crate::devices::{BaseLoad, HeatLoad, Profile, SolarPv};
use crate::error::{Result, SimError};
use crate::sim::types::{InputRow, InputTable, SAMPLES_PER_HOUR};

/// Seed offset for the load RNG to avoid correlation with solar noise.
const LOAD_SEED_OFFSET: u64 = 57;

const MONTH_DAYS: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of input steps per day.
pub const fn steps_per_day() -> usize {
    SAMPLES_PER_HOUR * 24
}

/// Calendar month for each of `days` consecutive days starting on the
/// first day of `start_month` (non-leap years).
pub fn month_calendar(start_month: u32, days: usize) -> Vec<u32> {
    let mut months = Vec::with_capacity(days);
    let mut month = start_month.clamp(1, 12);
    while months.len() < days {
        let len = MONTH_DAYS[(month - 1) as usize];
        for _ in 0..len {
            if months.len() == days {
                break;
            }
            months.push(month);
        }
        month = month % 12 + 1;
    }
    months
}

/// Builds a synthetic input table from profile parameters.
///
/// # Errors
///
/// Returns an error if the daylight window does not fit in a day, or if
/// non-finite profile parameters leak into the series.
pub fn synthesize(cfg: &ProfileConfig) -> Result<InputTable> {
    let spd = steps_per_day();
    if cfg.sunrise_idx >= cfg.sunset_idx || cfg.sunset_idx > spd {
        return Err(SimError::InvalidProfile(format!(
            "daylight window {}..{} does not fit in {spd} steps",
            cfg.sunrise_idx, cfg.sunset_idx
        )));
    }
    let mut pv = SolarPv::new(
        cfg.solar_peak,
        spd,
        cfg.sunrise_idx,
        cfg.sunset_idx,
        cfg.solar_winter_fraction,
        cfg.solar_noise_std,
        cfg.seed,
    );
    let mut load = BaseLoad::new(
        cfg.load_base,
        cfg.load_amp,
        cfg.load_phase_rad,
        cfg.load_noise_std,
        spd,
        cfg.seed.wrapping_add(LOAD_SEED_OFFSET),
    );
    let mut heat = HeatLoad::new(cfg.heat_summer, cfg.heat_winter);

    let calendar = month_calendar(cfg.start_month, cfg.days);
    let mut rows = Vec::with_capacity(calendar.len() * spd);
    for (day, &month) in calendar.iter().enumerate() {
        for step in 0..spd {
            let t = day * spd + step;
            rows.push(InputRow {
                generation: pv.energy(t, month),
                electrical_load: load.energy(t, month),
                heat_load: heat.energy(t, month),
                month,
            });
        }
    }

    InputTable::new(rows)
}
