use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Installs the global subscriber: pretty output for interactive use, JSON
/// otherwise. Logs go to stderr so they don't mix with the form on stdout.
/// A second call is a no-op.
pub fn init_logging(config: &Config) {
    let registry = tracing_subscriber::Registry::default().with(EnvFilter::from_default_env());

    let result = match config.interactive {
        true => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),

        false => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(err) = result {
        tracing::debug!(error = err.to_string(), "Logger already initialized");
    }
}
