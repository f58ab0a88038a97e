//! Integration tests for long-horizon conversion start, throttling and stop.
//!
//! The fixture is a steady surplus of 3 per step over 400 steps with a
//! battery of 10 and a conversion rate of 1 per step, so the policy
//! thresholds near the end of the series can be worked out by hand.

mod common;

use approx::assert_abs_diff_eq;
use hybrid_storage_sim::sim::engine::Engine;
use hybrid_storage_sim::sim::kpi::KpiReport;
use hybrid_storage_sim::sim::types::{DYNAMIC_RANGE_FLOOR, StepResult, StorageConfig};

const STEPS: usize = 400;

fn config() -> StorageConfig {
    // 4 per hour at 4 samples per hour gives 1 per step.
    StorageConfig::new(10.0, 4.0, 0.5, 1.0)
}

fn run_months(months: &[u32]) -> Vec<StepResult> {
    let rows: Vec<[f64; 4]> = months
        .iter()
        .map(|&m| [3.0, 0.0, 0.0, f64::from(m)])
        .collect();
    Engine::new(config()).run_detailed(&common::table(&rows))
}

#[test]
fn reserve_delays_start_until_battery_charged() {
    let results = run_months(&[6; STEPS]);

    assert_eq!(results[0].ctrl, 1.0);
    assert_eq!(results[0].deltas.delta_conversion, 0.0);
    assert_eq!(results[0].levels.short_level, 3.0);

    assert_eq!(results[1].deltas.delta_conversion, 1.0);
    assert_eq!(results[1].levels.short_level, 5.0);
}

#[test]
fn full_rate_then_throttled_then_stopped() {
    let results = run_months(&[6; STEPS]);

    // Full rate holds while the tail of the window still clears the rate.
    assert_eq!(results[307].ctrl, 1.0);
    assert_eq!(results[307].deltas.delta_conversion, 1.0);

    assert_eq!(results[308].ctrl, DYNAMIC_RANGE_FLOOR);
    assert_abs_diff_eq!(results[308].deltas.delta_conversion, 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(results[364].deltas.delta_conversion, 0.4, epsilon = 1e-12);

    assert_eq!(results[365].ctrl, 0.0);
    assert_eq!(results[365].deltas.delta_conversion, 0.0);
    assert!(results[365..].iter().all(|r| r.deltas.delta_conversion == 0.0));
}

#[test]
fn stored_gas_matches_diverted_energy() {
    let results = run_months(&[6; STEPS]);
    let last = results.last().expect("non-empty run");

    // 307 steps at 1.0 plus 57 steps at 0.4, each at forward efficiency 0.5.
    assert_abs_diff_eq!(last.levels.long_level, 164.9, epsilon = 1e-9);

    let kpi = KpiReport::from_results(&results, 10.0);
    assert_eq!(kpi.conversion_steps, 364);
    assert_abs_diff_eq!(kpi.conversion_total, 329.8, epsilon = 1e-9);
    assert_eq!(kpi.withdrawal_total, 0.0);
}

#[test]
fn battery_stays_full_while_converting() {
    let results = run_months(&[6; STEPS]);
    for r in &results[5..365] {
        assert_eq!(r.levels.short_level, 10.0);
        assert!(r.deltas.delta_waste > 0.0);
    }
}

#[test]
fn last_summer_month_never_starts_conversion() {
    let results = run_months(&[10; STEPS]);

    assert_eq!(results[0].ctrl, DYNAMIC_RANGE_FLOOR);
    assert!(results.iter().all(|r| r.ctrl != 1.0));
    assert!(results.iter().all(|r| r.deltas.delta_conversion == 0.0));
}

#[test]
fn running_conversion_continues_into_last_summer_month() {
    let mut months = vec![9; 50];
    months.extend(vec![10; STEPS - 50]);
    let results = run_months(&months);

    assert_eq!(results[49].deltas.delta_conversion, 1.0);
    assert_eq!(results[50].ctrl, DYNAMIC_RANGE_FLOOR);
    assert_abs_diff_eq!(results[50].deltas.delta_conversion, 0.4, epsilon = 1e-12);
}

#[test]
fn autumn_stops_conversion() {
    let mut months = vec![6; 50];
    months.extend(vec![11; STEPS - 50]);
    let results = run_months(&months);

    assert_eq!(results[49].deltas.delta_conversion, 1.0);
    assert!(results[50..].iter().all(|r| r.ctrl == 0.0));
    assert!(results[50..].iter().all(|r| r.deltas.delta_conversion == 0.0));
}
