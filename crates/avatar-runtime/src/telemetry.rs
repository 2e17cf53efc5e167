//! Log subscriber setup

use tracing_subscriber::EnvFilter;

use crate::RuntimeConfig;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `config.log_filter`. Logs go to stderr, as JSON
/// lines when `config.json_logs` is set. Returns `false` if a subscriber
/// was already installed.
pub fn init(config: &RuntimeConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
