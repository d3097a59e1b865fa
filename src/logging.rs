use crate::config::LOG_ENV;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `NOVAMIND_LOG` (default `warn`).
/// Repeated calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
