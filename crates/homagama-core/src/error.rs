//! Centralized error types for the Homagama predictor.
//!
//! The pipeline has exactly two failure kinds that reach the user:
//! - `DataFetch`: the weather source was unreachable, answered with a
//!   non-success status, or returned a payload we could not read
//! - `Prediction`: the same, for the prediction service
//!
//! Crate-level errors (`WeatherError`, `PredictionError`) convert into
//! `AppError` at the workflow boundary. Use `user_message()` for UI display.

use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const GENERIC_RETRY_MESSAGE: &str = "Could not retrieve predictions. Please try again.";

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Weather observation could not be fetched or read.
    #[error("{0}")]
    DataFetch(String),

    /// Prediction service call failed.
    #[error("{0}")]
    Prediction(String),

    /// A prediction is already in flight; the trigger is disabled.
    #[error("A prediction is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns the message to show in the error view.
    ///
    /// Pipeline errors show their own text, falling back to a generic retry
    /// prompt when that text is empty.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DataFetch(msg) | AppError::Prediction(msg) => {
                if msg.trim().is_empty() {
                    GENERIC_RETRY_MESSAGE.to_string()
                } else {
                    msg.clone()
                }
            }
            AppError::Busy => "A forecast is already being calculated.".to_string(),
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Other(_) => GENERIC_RETRY_MESSAGE.to_string(),
        }
    }

    /// Whether this error came out of the fetch/predict pipeline.
    pub fn is_pipeline_error(&self) -> bool {
        matches!(self, AppError::DataFetch(_) | AppError::Prediction(_))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Unknown prediction endpoint: {0} (expected \"production\" or \"local\")")]
    UnknownEndpoint(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::UnknownEndpoint(_) => {
                "Unknown prediction endpoint. Use \"production\" or \"local\"."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_errors_surface_their_own_text() {
        let err = AppError::DataFetch("API Error: Internal Server Error".into());
        assert_eq!(err.user_message(), "API Error: Internal Server Error");

        let err = AppError::Prediction("Backend Error: Bad Gateway".into());
        assert_eq!(err.user_message(), "Backend Error: Bad Gateway");
    }

    #[test]
    fn test_empty_message_falls_back_to_retry_prompt() {
        let err = AppError::Prediction(String::new());
        assert_eq!(err.user_message(), GENERIC_RETRY_MESSAGE);

        let err = AppError::DataFetch("   ".into());
        assert_eq!(err.user_message(), GENERIC_RETRY_MESSAGE);
    }

    #[test]
    fn test_config_error_conversion() {
        let app_err: AppError = ConfigError::UnknownEndpoint("staging".into()).into();
        assert!(matches!(app_err, AppError::Config(ConfigError::UnknownEndpoint(_))));
        assert!(!app_err.is_pipeline_error());
    }

    #[test]
    fn test_non_pipeline_messages() {
        assert_eq!(
            AppError::Busy.user_message(),
            "A forecast is already being calculated."
        );
        assert_eq!(
            AppError::from(ConfigError::Invalid("prediction.local_url".into())).user_message(),
            "Invalid configuration. Check your settings."
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("client build failed")).user_message(),
            GENERIC_RETRY_MESSAGE
        );
    }

    #[test]
    fn test_pipeline_classification() {
        assert!(AppError::DataFetch("x".into()).is_pipeline_error());
        assert!(AppError::Prediction("x".into()).is_pipeline_error());
        assert!(!AppError::Busy.is_pipeline_error());
    }
}
