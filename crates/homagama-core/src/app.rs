use anyhow::Result;

use crate::config::Config;

/// Main application state and lifecycle manager.
///
/// Configuration is loaded and the prediction endpoint is resolved exactly
/// once, here. Nothing downstream re-reads either.
pub struct App {
    config: Config,
    prediction_url: String,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, _warnings) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    /// Create an application instance from an already-built configuration
    pub fn with_config(config: Config) -> Self {
        let prediction_url = config.prediction.resolve_url().to_string();

        tracing::info!(
            endpoint = %config.prediction.endpoint,
            url = %prediction_url,
            "Prediction endpoint selected"
        );

        Self {
            config,
            prediction_url,
        }
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Prediction URL resolved at startup
    pub fn prediction_url(&self) -> &str {
        &self.prediction_url
    }
}
