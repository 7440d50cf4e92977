//! Development-time tracing for rollout runs.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`. Config snapshots
//! (`io/config_store`) are product artifacts and are written regardless of
//! the log level.

use std::time::Instant;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=rollout=debug cargo run -- save-config conf.toml out/
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

/// Run `f` and log its wall-clock duration under `label`.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    info!(
        label,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "timed section finished"
    );
    out
}
