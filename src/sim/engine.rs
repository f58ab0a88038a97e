//! Simulation engine sequencing policy, reservoirs, and disposal per step.

use tracing::{debug, info};

use crate::devices::{Battery, GasStore, Reservoir};
use crate::forecast::{ForecastMatrix, HorizonForecast};

use super::policy::SeasonalPolicy;
use super::types::{InputRow, InputTable, SimulationOutput, StepResult, StorageConfig, StorageState};

/// Simulation engine owning the reservoirs and the control policy.
///
/// The engine itself is immutable during a run; all evolving quantities
/// live in a [`StorageState`] passed by exclusive reference to [`Engine::step`].
#[derive(Debug, Clone)]
pub struct Engine {
    config: StorageConfig,
    policy: SeasonalPolicy,
    battery: Battery,
    gas: GasStore,
}

impl Engine {
    /// Creates a new simulation engine.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            policy: SeasonalPolicy::new(config.long_rate()),
            battery: Battery::new(config.short_capacity),
            gas: GasStore::new(&config),
        }
    }

    /// Executes one time step, mutating `state` and returning the step record.
    ///
    /// # Arguments
    ///
    /// * `state` - Reservoir state at the end of the previous step
    /// * `t` - Step index
    /// * `row` - Input for this step
    /// * `forecast_row` - Forecast row for this step
    pub fn step(
        &self,
        state: &mut StorageState,
        t: usize,
        row: &InputRow,
        forecast_row: &[f64],
    ) -> StepResult {
        state.delta_short = 0.0;
        state.delta_long = 0.0;
        state.delta_waste = 0.0;

        // 1. Net mismatch
        let mismatch = row.mismatch();

        // 2. Control signal, from the state before this step
        let ctrl = if self.config.has_long_storage() {
            self.policy.control(forecast_row, state.short_level, row.month)
        } else {
            0.0
        };

        // 3. Long-horizon conversion, then 4. battery
        let remainder = self.gas.convert(state, mismatch, ctrl);
        let remainder = self.battery.allocate(state, remainder);

        // 5./6. Deficit from the gas store, surplus curtailed
        if remainder < 0.0 {
            self.gas.withdraw(state, remainder);
        } else {
            state.waste_total += remainder;
            state.delta_waste = remainder;
        }

        // 7. Heat demand
        self.gas.draw_heat(state, row.heat_load);

        StepResult {
            timestep: t,
            month: row.month,
            mismatch,
            ctrl,
            heat_load: row.heat_load,
            levels: state.levels(),
            deltas: state.deltas(),
        }
    }

    /// Runs every input row in order and returns the complete step records.
    pub fn run_detailed(&self, input: &InputTable) -> Vec<StepResult> {
        let forecast = HorizonForecast.forecast(input, &self.config);
        info!(
            steps = input.len(),
            horizon = forecast.horizon(),
            long_rate = self.config.long_rate(),
            "starting run"
        );

        self.run_with_forecast(input, &forecast)
    }

    /// Runs every input row and returns the two output tables.
    pub fn run(&self, input: &InputTable) -> SimulationOutput {
        SimulationOutput::from_results(&self.run_detailed(input))
    }

    /// Runs against a precomputed forecast.
    ///
    /// # Panics
    ///
    /// Panics if `forecast` has fewer rows than `input`.
    pub fn run_with_forecast(
        &self,
        input: &InputTable,
        forecast: &ForecastMatrix,
    ) -> Vec<StepResult> {
        let mut state = StorageState::default();
        let mut results = Vec::with_capacity(input.len());
        let mut last_ctrl = 0.0;

        for (t, row) in input.rows().iter().enumerate() {
            let result = self.step(&mut state, t, row, forecast.row(t));
            if result.ctrl != last_ctrl {
                debug!(
                    timestep = t,
                    month = row.month,
                    from = last_ctrl,
                    to = result.ctrl,
                    "control signal changed"
                );
                last_ctrl = result.ctrl;
            }
            results.push(result);
        }

        for device in [&self.battery as &dyn Reservoir, &self.gas] {
            info!(
                device = device.device_type(),
                level = device.level(&state),
                "final level"
            );
        }
        info!(waste_total = state.waste_total, "run finished");
        results
    }

    /// Returns the storage configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the battery (for KPI capacity queries).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// Returns the long-horizon store.
    pub fn gas_store(&self) -> &GasStore {
        &self.gas
    }
}
