pub mod api;
pub mod artifacts;
pub mod audit;
pub mod config;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("HealthPredict starting v{}", config::APP_VERSION);
}
