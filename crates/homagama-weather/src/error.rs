//! Weather-source error types.

use homagama_core::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// The API answered with a non-success status.
    #[error("API Error: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field the feature extractor reads has no entry.
    #[error("Weather response is missing {0}")]
    MissingField(String),

    #[error("Invalid date in weather response: {0}")]
    InvalidDate(String),
}

impl WeatherError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Every weather failure reaches the user as a data-fetch error.
impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        AppError::DataFetch(e.to_string())
    }
}
