//! Tracing/logging initialization.

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Configuration
/// problems collected while loading `config` are logged right after.
pub fn init(config: &LogConfig) {
    let (filter, filter_error) = match EnvFilter::try_new(config.filter()) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(LogConfig::DEFAULT_FILTER), Some(err)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let _ = if config.json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Some(err) = filter_error {
        warn!(
            filter = config.filter(),
            error = %err,
            "invalid log filter, using '{}'",
            LogConfig::DEFAULT_FILTER
        );
    }
    for issue in config.issues() {
        warn!("{}", issue);
    }
}
