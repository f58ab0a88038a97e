//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::sim::types::StorageConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Reservoir parameters.
    #[serde(default)]
    pub storage: StorageSection,
    /// Where the input series comes from.
    #[serde(default)]
    pub input: InputConfig,
    /// Synthetic profile parameters, used when `input.source = "synthetic"`.
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Reservoir parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    /// Short-horizon (battery) capacity.
    pub short_capacity: f64,
    /// Long-horizon conversion throughput per hour (0 disables the store).
    pub long_rate_per_hour: f64,
    /// Power-to-gas efficiency.
    pub forward_efficiency: f64,
    /// Gas-to-power efficiency.
    pub reverse_efficiency: f64,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            short_capacity: 20.0,
            long_rate_per_hour: 0.8,
            forward_efficiency: 0.6,
            reverse_efficiency: 0.5,
        }
    }
}

impl StorageSection {
    /// Converts to the immutable engine configuration.
    pub fn to_storage_config(&self) -> StorageConfig {
        StorageConfig::new(
            self.short_capacity,
            self.long_rate_per_hour,
            self.forward_efficiency,
            self.reverse_efficiency,
        )
    }
}

/// Input source selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// `"synthetic"` or `"csv"`.
    pub source: String,
    /// CSV file path, required when `source = "csv"`.
    pub path: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            path: None,
        }
    }
}

/// Synthetic profile parameters (energy per step).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Master random seed.
    pub seed: u64,
    /// Number of days to synthesize (must be > 0).
    pub days: usize,
    /// Calendar month of the first day (1-12).
    pub start_month: u32,
    /// Solar peak energy per step at midsummer noon.
    pub solar_peak: f64,
    /// Midwinter solar output relative to midsummer.
    pub solar_winter_fraction: f64,
    /// Sunrise step index (inclusive).
    pub sunrise_idx: usize,
    /// Sunset step index (exclusive).
    pub sunset_idx: usize,
    /// Solar noise standard deviation (fraction of output).
    pub solar_noise_std: f64,
    /// Mean electrical load per step.
    pub load_base: f64,
    /// Daily electrical load amplitude per step.
    pub load_amp: f64,
    /// Load phase offset (radians).
    pub load_phase_rad: f64,
    /// Load noise standard deviation.
    pub load_noise_std: f64,
    /// Heat demand per step at midsummer.
    pub heat_summer: f64,
    /// Heat demand per step at midwinter.
    pub heat_winter: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            days: 365,
            start_month: 1,
            solar_peak: 1.6,
            solar_winter_fraction: 0.2,
            sunrise_idx: 24,
            sunset_idx: 80,
            solar_noise_std: 0.1,
            load_base: 0.3,
            load_amp: 0.1,
            load_phase_rad: 1.2,
            load_noise_std: 0.02,
            heat_summer: 0.02,
            heat_winter: 0.15,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"profile.days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario: one synthetic year with both reservoirs.
    pub fn baseline() -> Self {
        Self {
            storage: StorageSection::default(),
            input: InputConfig::default(),
            profile: ProfileConfig::default(),
        }
    }

    /// Returns the battery-only preset: no long-horizon conversion.
    pub fn no_gas() -> Self {
        Self {
            storage: StorageSection {
                long_rate_per_hour: 0.0,
                ..StorageSection::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the small-battery preset: tight short-horizon buffer, larger PV.
    pub fn small_battery() -> Self {
        Self {
            storage: StorageSection {
                short_capacity: 4.0,
                ..StorageSection::default()
            },
            profile: ProfileConfig {
                solar_peak: 2.4,
                ..ProfileConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "no_gas", "small_battery"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "no_gas" => Ok(Self::no_gas()),
            "small_battery" => Ok(Self::small_battery()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates structural fields and returns a list of errors.
    ///
    /// Storage values are only checked for finiteness; implausible ranges
    /// are accepted and logged.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let st = &self.storage;

        for (field, value) in [
            ("storage.short_capacity", st.short_capacity),
            ("storage.long_rate_per_hour", st.long_rate_per_hour),
            ("storage.forward_efficiency", st.forward_efficiency),
            ("storage.reverse_efficiency", st.reverse_efficiency),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be a finite number".into(),
                });
            }
        }

        let input = &self.input;
        match input.source.as_str() {
            "synthetic" => {}
            "csv" => {
                if input.path.is_none() {
                    errors.push(ConfigError {
                        field: "input.path".into(),
                        message: "required when input.source = \"csv\"".into(),
                    });
                }
            }
            other => errors.push(ConfigError {
                field: "input.source".into(),
                message: format!("must be \"synthetic\" or \"csv\", got \"{other}\""),
            }),
        }

        let p = &self.profile;
        if p.days == 0 {
            errors.push(ConfigError {
                field: "profile.days".into(),
                message: "must be > 0".into(),
            });
        }
        if !(1..=12).contains(&p.start_month) {
            errors.push(ConfigError {
                field: "profile.start_month".into(),
                message: "must be in 1..=12".into(),
            });
        }
        if p.sunrise_idx >= p.sunset_idx {
            errors.push(ConfigError {
                field: "profile.sunrise_idx".into(),
                message: "must be < profile.sunset_idx".into(),
            });
        }
        if p.sunset_idx > crate::profile::steps_per_day() {
            errors.push(ConfigError {
                field: "profile.sunset_idx".into(),
                message: format!("must be <= {}", crate::profile::steps_per_day()),
            });
        }

        errors
    }

    /// Logs storage parameters that are accepted but physically implausible.
    pub fn warn_implausible(&self) {
        let st = &self.storage;
        if st.short_capacity < 0.0 {
            warn!(value = st.short_capacity, "negative short-horizon capacity");
        }
        if st.long_rate_per_hour < 0.0 {
            warn!(
                value = st.long_rate_per_hour,
                "negative long-horizon rate, conversion disabled"
            );
        }
        for (name, eff) in [
            ("forward_efficiency", st.forward_efficiency),
            ("reverse_efficiency", st.reverse_efficiency),
        ] {
            if !(0.0..=1.0).contains(&eff) {
                warn!(parameter = name, value = eff, "efficiency outside [0, 1]");
            }
        }
    }
}
