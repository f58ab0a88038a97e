pub mod engine;
/// Post-hoc run summary.
pub mod kpi;
/// Seasonal control policy for the long-horizon store.
pub mod policy;
pub mod types;
