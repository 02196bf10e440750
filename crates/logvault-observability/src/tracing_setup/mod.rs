//! Tracing setup: subscriber installation and event helpers.

pub mod events;

use logvault_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the default subscriber: JSON output, `info` unless `LOGVAULT_LOG`
/// says otherwise. Returns false if a global subscriber already exists.
pub fn init_tracing() -> bool {
    init_from_config(&ObservabilityConfig::default())
}

/// Initialize tracing from the observability config. `LOGVAULT_LOG` still
/// wins when set. Returns false if a global subscriber already exists.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env("LOGVAULT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
