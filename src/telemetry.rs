//! Process-wide logging initialisation.
//!
//! Call [`init`] once from the binary entry point before any scenario runs.
//! Library code only emits `tracing` events and never installs a subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "SCENARIO_LOG";

/// Filter applied when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a stderr `fmt` subscriber filtered by [`LOG_ENV_VAR`].
///
/// Subsequent calls are no-ops; the first installed subscriber wins.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
