use std::env;
use std::path::PathBuf;

pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub input: Option<PathBuf>,
    pub levels_out: Option<PathBuf>,
    pub deltas_out: Option<PathBuf>,
    pub quiet: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut input = None;
    let mut levels_out = None;
    let mut deltas_out = None;
    let mut quiet = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--input" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --input (expected a CSV file path)")?;
                if input.replace(PathBuf::from(path)).is_some() {
                    return Err("--input provided more than once".to_string());
                }
            }
            "--levels-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --levels-out (expected a file path)")?;
                if levels_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--levels-out provided more than once".to_string());
                }
            }
            "--deltas-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --deltas-out (expected a file path)")?;
                if deltas_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--deltas-out provided more than once".to_string());
                }
            }
            "--quiet" | "-q" => quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(CliOptions {
        scenario,
        preset,
        input,
        levels_out,
        deltas_out,
        quiet,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("hybrid-storage-sim: battery + power-to-gas dispatch simulator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  hybrid-storage-sim [--scenario <path> | --preset <name>] [--input <csv>] \
         [--levels-out <path>] [--deltas-out <path>] [--quiet]"
    );
    eprintln!();
    eprintln!("Presets: baseline (default), no_gas, small_battery");
    eprintln!("Set RUST_LOG to adjust log verbosity.");
}
