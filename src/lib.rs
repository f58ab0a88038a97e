//! Hybrid short/long-horizon energy storage dispatch simulator.

pub mod config;
/// Reservoirs and synthetic profile sources.
pub mod devices;
pub mod error;
pub mod forecast;
pub mod io;
pub mod profile;
/// Simulation engine, control policy, and KPI modules.
pub mod sim;
pub mod telemetry;
