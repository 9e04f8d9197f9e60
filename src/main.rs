use portal_table::app::App;
use portal_table::config::{AppConfig, DEFAULT_LOG_FILTER};
use portal_table::logging::{init_logging, LoggingConfig};

fn main() {
    let log_filter = AppConfig::load()
        .map(|config| config.log_filter)
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    init_logging(&LoggingConfig::new(log_filter));

    #[cfg(feature = "desktop")]
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new().with_title("Market Data Admin"),
            ),
        )
        .launch(App);

    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App);
}
