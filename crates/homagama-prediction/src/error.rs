//! Prediction-service error types.

use homagama_core::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    /// The service answered with a non-success status.
    #[error("Backend Error: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Failed to reach prediction service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed prediction response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PredictionError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        AppError::Prediction(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = PredictionError::from_status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Backend Error: Bad Gateway");
    }

    #[test]
    fn test_maps_to_prediction_kind() {
        let app_err: AppError = PredictionError::from_status(reqwest::StatusCode::NOT_FOUND).into();
        assert!(matches!(app_err, AppError::Prediction(ref m) if m == "Backend Error: Not Found"));
    }
}
