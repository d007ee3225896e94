//! Integration tests for PredictionClient fed by real feature extraction.
//!
//! The weather payload is served by one mock server and the extracted
//! features are posted to another, the way the workflow chains them.

use chrono_tz::Asia::Colombo;
use homagama_core::AppError;
use homagama_prediction::{PredictionClient, PredictionError};
use homagama_weather::{extract_features, Location, WeatherProvider};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a forecast with the given daily values
fn test_forecast(tmax: f64, tmin: f64, prcp: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "daily": {
            "time": ["2024-03-01"],
            "temperature_2m_max": [tmax],
            "temperature_2m_min": [tmin],
            "precipitation_sum": [prcp]
        },
        "hourly": {
            "time": ["2024-03-01T00:00", "2024-03-01T01:00", "2024-03-01T02:00"],
            "temperature_2m": [21.0, 20.5, 20.1],
            "precipitation_probability": [10, 15, null],
            "windspeed_10m": [5.0, 5.5, 6.0],
            "relative_humidity_2m": [90, 91, 92]
        }
    })
}

async fn features_from(body: serde_json::Value) -> homagama_weather::FeatureRecord {
    let weather_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&weather_server)
        .await;

    let provider = WeatherProvider::with_base_url(Location::default(), &weather_server.uri()).unwrap();
    let observation = provider.fetch().await.unwrap();
    extract_features(&observation, &Colombo).unwrap()
}

#[tokio::test]
async fn test_extracted_features_reach_the_service() {
    let features = features_from(test_forecast(31.0, 23.0, serde_json::json!(0.8))).await;

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(serde_json::json!({
            "tavg": 27.0,
            "tmin": 23.0,
            "tmax": 31.0,
            "prcp": 0.8,
            "temp_range": 8.0,
            "month": 3,
            "day_of_year": 61,
            "hourly_temps": [21.0, 20.5, 20.1],
            "hourly_rain_prob": [10.0, 15.0, null]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predicted_temp": 28.4,
            "predicted_rain_chance": 35,
            "today_data": {"temp_max": 31.0, "temp_min": 23.0, "temp_avg": 27.0, "precipitation": 0.8}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
    let prediction = client.predict(&features).await.unwrap();

    assert_eq!(prediction.predicted_temp, 28.4);
    assert_eq!(prediction.predicted_rain_chance, 35.0);
    assert_eq!(prediction.today().temp_avg, 27.0);
}

#[tokio::test]
async fn test_null_precipitation_is_sent_as_null() {
    let features = features_from(test_forecast(30.0, 24.0, serde_json::Value::Null)).await;
    assert!(features.prcp.is_nan());

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(serde_json::json!({"prcp": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predicted_temp": 27.0,
            "predicted_rain_chance": 50
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
    let prediction = client.predict(&features).await.unwrap();

    assert!(prediction.today().precipitation.is_nan());
}

#[tokio::test]
async fn test_service_errors_classify_as_prediction() {
    let features = features_from(test_forecast(31.0, 23.0, serde_json::json!(0.0))).await;

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = PredictionClient::new(&format!("{}/predict", mock_server.uri())).unwrap();
    let err = client.predict(&features).await.unwrap_err();
    assert!(matches!(err, PredictionError::Status { status: 500, .. }));

    let app_err = AppError::from(err);
    assert!(app_err.is_pipeline_error());
    assert_eq!(app_err.user_message(), "Backend Error: Internal Server Error");
}
