//! Simulator entry point: CLI wiring, config-driven input, and output export.

mod cli;

use std::path::Path;
use std::process;

use tracing::info;

use hybrid_storage_sim::config::ScenarioConfig;
use hybrid_storage_sim::error::SimError;
use hybrid_storage_sim::io::export::{export_deltas_csv, export_levels_csv};
use hybrid_storage_sim::io::import::import_csv;
use hybrid_storage_sim::profile::synthesize;
use hybrid_storage_sim::sim::engine::Engine;
use hybrid_storage_sim::sim::kpi::KpiReport;
use hybrid_storage_sim::sim::types::{InputTable, SimulationOutput};
use hybrid_storage_sim::telemetry::init_tracing;

/// Loads the input series named by the scenario (or the `--input` override).
fn load_input(cfg: &ScenarioConfig, override_path: Option<&Path>) -> Result<InputTable, SimError> {
    if let Some(path) = override_path {
        info!(path = %path.display(), "reading input csv");
        return import_csv(path);
    }
    match (cfg.input.source.as_str(), cfg.input.path.as_deref()) {
        ("csv", Some(path)) => {
            info!(path = %path.display(), "reading input csv");
            import_csv(path)
        }
        _ => {
            info!(
                days = cfg.profile.days,
                seed = cfg.profile.seed,
                "synthesizing input"
            );
            synthesize(&cfg.profile)
        }
    }
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    init_tracing(cli.quiet);

    // Load config: --scenario takes priority, then --preset
    let scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("baseline"))
    };
    let scenario = match scenario {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Validate (the profile section is irrelevant when --input is given)
    let errors: Vec<_> = scenario
        .validate()
        .into_iter()
        .filter(|e| cli.input.is_none() || e.field.starts_with("storage."))
        .collect();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario.warn_implausible();

    let input = match load_input(&scenario, cli.input.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let engine = Engine::new(scenario.storage.to_storage_config());
    let results = engine.run_detailed(&input);

    if !cli.quiet {
        for r in &results {
            println!("{r}");
        }
    }

    let kpi = KpiReport::from_results(&results, engine.battery().capacity);
    println!("\n{kpi}");

    let output = SimulationOutput::from_results(&results);
    if let Some(ref path) = cli.levels_out {
        if let Err(e) = export_levels_csv(&output.levels, path) {
            eprintln!("error: failed to write levels CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "levels written");
    }
    if let Some(ref path) = cli.deltas_out {
        if let Err(e) = export_deltas_csv(&output.deltas, path) {
            eprintln!("error: failed to write deltas CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "deltas written");
    }
}
