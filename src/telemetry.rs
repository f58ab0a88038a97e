//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "hybrid_storage_sim=info";

/// Installs a `tracing` subscriber writing compact lines to stderr.
///
/// `RUST_LOG` overrides the default filter; `quiet` lowers it to warnings.
pub fn init_tracing(quiet: bool) {
    let fallback = if quiet {
        "hybrid_storage_sim=warn"
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second initialisation (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init();
}
