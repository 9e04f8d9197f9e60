//! Console logging via `tracing`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub include_location: bool,
}

impl LoggingConfig {
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            include_location: cfg!(debug_assertions),
        }
    }
}

pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("logging already initialized: {err}");
    }
}
