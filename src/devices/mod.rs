//! Storage reservoirs and synthetic profile sources.

/// Residential electrical and heat load profile generators.
pub mod baseload;
/// Short-horizon battery storage.
pub mod battery;
/// Long-horizon power-to-gas / gas-to-power storage.
pub mod gas_store;
/// Solar photovoltaic generation model.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use baseload::{BaseLoad, HeatLoad};
pub use battery::Battery;
pub use gas_store::GasStore;
pub use solar::SolarPv;
pub use types::{Profile, Reservoir};
