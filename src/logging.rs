pub const LOG_TARGET: &str = "day_planner::log";

/// Diagnostic sink for messages the driver wants on record, such as
/// validation failures while building tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Self
    }

    pub fn log(&self, message: &str) {
        tracing::warn!(target: LOG_TARGET, "{message}");
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `default_filter` when set. Output goes to stderr so command output on
/// stdout stays clean.
#[cfg(feature = "cli")]
pub fn init(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. in tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
