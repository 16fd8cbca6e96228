//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over the flag-derived level.
pub fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Already installed (e.g. in tests) is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
