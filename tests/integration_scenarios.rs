//! Integration tests for whole runs: reference scenarios and run invariants.

mod common;

use approx::assert_abs_diff_eq;
use hybrid_storage_sim::forecast::HorizonForecast;
use hybrid_storage_sim::sim::engine::Engine;
use hybrid_storage_sim::sim::kpi::KpiReport;
use hybrid_storage_sim::sim::types::StorageConfig;

#[test]
fn surplus_absorbed_by_battery() {
    let input = common::table(&[[5.0, 2.0, 0.0, 1.0]]);
    let out = Engine::new(common::battery_only(10.0)).run(&input);

    assert_eq!(out.levels[0].short_level, 3.0);
    assert_eq!(out.levels[0].long_level, 0.0);
    assert_eq!(out.levels[0].waste_total, 0.0);
    assert_eq!(out.deltas[0].delta_short, 3.0);
    assert_eq!(out.deltas[0].delta_conversion, 0.0);
}

#[test]
fn surplus_beyond_headroom_is_curtailed() {
    let input = common::table(&[[5.0, 2.0, 0.0, 1.0]]);
    let out = Engine::new(common::battery_only(2.0)).run(&input);

    assert_eq!(out.levels[0].short_level, 2.0);
    assert_eq!(out.levels[0].waste_total, 1.0);
    assert_eq!(out.deltas[0].delta_waste, 1.0);
}

#[test]
fn deficit_with_empty_battery_draws_gas_store() {
    let input = common::table(&[[1.0, 5.0, 0.0, 1.0]]);
    let out = Engine::new(StorageConfig::new(10.0, 0.0, 1.0, 0.8)).run(&input);

    assert_eq!(out.levels[0].short_level, 0.0);
    assert_abs_diff_eq!(out.levels[0].long_level, -3.2, epsilon = 1e-12);
    assert_eq!(out.deltas[0].delta_long, -4.0);
}

#[test]
fn output_tables_match_input_length() {
    let input = common::synthetic(10, 4, 1);
    let out = Engine::new(common::default_hybrid()).run(&input);
    assert_eq!(out.levels.len(), input.len());
    assert_eq!(out.deltas.len(), input.len());
}

#[test]
fn battery_level_stays_within_capacity() {
    let cfg = StorageConfig::new(4.0, 0.8, 0.6, 0.5);
    let input = common::synthetic(60, 5, 7);
    let out = Engine::new(cfg).run(&input);

    for (t, l) in out.levels.iter().enumerate() {
        assert!(
            l.short_level >= 0.0 && l.short_level <= 4.0,
            "short level out of bounds at t={t}: {}",
            l.short_level
        );
    }
}

#[test]
fn waste_is_non_decreasing() {
    let input = common::synthetic(60, 5, 3);
    let out = Engine::new(common::default_hybrid()).run(&input);

    for w in out.levels.windows(2) {
        assert!(w[1].waste_total >= w[0].waste_total);
    }
    assert!(out.deltas.iter().all(|d| d.delta_waste >= 0.0));
}

#[test]
fn no_long_storage_never_converts() {
    let cfg = StorageConfig::new(20.0, 0.0, 0.6, 0.5);
    let input = common::synthetic(45, 5, 11);

    let forecast = HorizonForecast.forecast(&input, &cfg);
    assert!((0..forecast.rows()).all(|t| forecast.row(t).iter().all(|v| *v == 0.0)));

    let results = Engine::new(cfg).run_detailed(&input);
    assert!(results.iter().all(|r| r.deltas.delta_conversion == 0.0));
    assert!(results.iter().all(|r| r.ctrl == 0.0));
}

#[test]
fn winter_months_never_activate_conversion() {
    // Large steady surplus, but outside the summer window.
    let mut rows = vec![[5.0, 1.0, 0.0, 1.0]; 300];
    rows.extend(vec![[5.0, 1.0, 0.0, 12.0]; 300]);
    let input = common::table(&rows);
    let results = Engine::new(StorageConfig::new(10.0, 4.0, 1.0, 1.0)).run_detailed(&input);

    assert!(results.iter().all(|r| r.ctrl == 0.0));
    assert!(results.iter().all(|r| r.deltas.delta_conversion == 0.0));
}

#[test]
fn heat_drives_gas_store_negative_without_clamping() {
    let input = common::constant_rows(100, [0.0, 0.0, 0.5, 1.0]);
    let out = Engine::new(common::battery_only(10.0)).run(&input);
    assert_abs_diff_eq!(out.levels[99].long_level, -50.0, epsilon = 1e-9);
}

#[test]
fn identical_runs_are_identical() {
    let input = common::synthetic(20, 6, 5);
    let engine = Engine::new(common::default_hybrid());
    assert_eq!(engine.run(&input), engine.run(&input));
}

#[test]
fn kpi_values_are_finite_for_a_synthetic_year() {
    let input = common::synthetic(365, 1, 42);
    let engine = Engine::new(common::default_hybrid());
    let results = engine.run_detailed(&input);
    let kpi = KpiReport::from_results(&results, engine.battery().capacity);

    assert_eq!(kpi.steps, 365 * 96);
    assert!(kpi.final_long_level.is_finite());
    assert!(kpi.waste_total >= 0.0);
    assert!(kpi.heat_total > 0.0);
    assert!(kpi.battery_equivalent_full_cycles.is_finite());
}
