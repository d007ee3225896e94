//! HTTP client for the prediction endpoint.

use homagama_weather::FeatureRecord;
use reqwest::{header, Client};
use std::sync::Arc;
use tracing::instrument;

use crate::error::PredictionError;
use crate::types::PredictionResult;

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Arc<Client>,
    url: String,
}

impl PredictionClient {
    /// `url` is the full endpoint address, resolved once at startup.
    pub fn new(url: &str) -> Result<Self, PredictionError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client: Arc::new(client),
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the feature record and read back the prediction.
    #[instrument(skip(self, features), fields(url = %self.url), level = "info")]
    pub async fn predict(&self, features: &FeatureRecord) -> Result<PredictionResult, PredictionError> {
        let body = serde_json::to_string(features)?;
        tracing::debug!(%body, "Sending features to prediction model");

        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Prediction service returned status {}", status);
            return Err(PredictionError::from_status(status));
        }

        let text = response.text().await?;
        let prediction: PredictionResult = serde_json::from_str(&text)?;

        tracing::info!(
            predicted_temp = prediction.predicted_temp,
            predicted_rain_chance = prediction.predicted_rain_chance,
            "Predictions received"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn features() -> FeatureRecord {
        FeatureRecord {
            tavg: 26.15,
            tmin: 22.1,
            tmax: 30.2,
            prcp: f64::NAN,
            temp_range: 8.1,
            month: 6,
            day_of_year: 167,
            hourly_temps: vec![23.0, 22.5],
            hourly_rain_prob: vec![40.0, 45.0],
            hourly_wind: vec![10.0, 11.0],
            hourly_humidity: vec![85.0, 86.0],
        }
    }

    #[tokio::test]
    async fn test_predict_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header_eq("Content-Type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "month": 6,
                "day_of_year": 167,
                "prcp": null,
                "hourly_temps": [23.0, 22.5]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predicted_temp": 27.964,
                "predicted_rain_chance": 63.2,
                "today_data": {"temp_max": 30.2, "temp_min": 22.1, "temp_avg": 26.15, "precipitation": 0}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
        let prediction = client.predict(&features()).await.unwrap();

        assert_eq!(prediction.predicted_temp, 27.964);
        assert_eq!(prediction.today().precipitation, 0.0);
    }

    #[tokio::test]
    async fn test_predict_tolerates_non_object_today_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predicted_temp": 27.964,
                "predicted_rain_chance": 63.2,
                "today_data": "n/a"
            })))
            .mount(&mock_server)
            .await;

        let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
        let prediction = client.predict(&features()).await.unwrap();

        assert_eq!(prediction.predicted_temp, 27.964);
        assert!(prediction.today().temp_avg.is_nan());
    }

    #[tokio::test]
    async fn test_cloned_client_shares_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predicted_temp": 20.0,
                "predicted_rain_chance": 10.0
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
        let copy = client.clone();
        assert_eq!(copy.url(), client.url());

        client.predict(&features()).await.unwrap();
        copy.predict(&features()).await.unwrap();
    }

    #[tokio::test]
    async fn test_predict_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
        let err = client.predict(&features()).await.unwrap_err();

        assert!(matches!(err, PredictionError::Status { status: 503, .. }));
        assert_eq!(err.to_string(), "Backend Error: Service Unavailable");
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
        let err = client.predict(&features()).await.unwrap_err();

        assert!(matches!(err, PredictionError::Parse(_)));
    }

    #[tokio::test]
    async fn test_predict_network_failure() {
        let client = PredictionClient::new("http://127.0.0.1:1/predict").unwrap();
        let err = client.predict(&features()).await.unwrap_err();

        assert!(matches!(err, PredictionError::Network(_)));
    }
}
