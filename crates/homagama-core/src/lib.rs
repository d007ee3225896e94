pub mod app;
pub mod config;
pub mod error;
pub mod numeric;

pub use app::App;
pub use config::{Config, PredictionConfig, PredictionEndpoint, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, GENERIC_RETRY_MESSAGE};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr; stdout belongs to the presenter
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Homagama core initialized");
    Ok(())
}
