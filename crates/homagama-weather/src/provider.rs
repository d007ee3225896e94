//! Open-Meteo forecast client.

use homagama_core::WeatherConfig;
use reqwest::Client;
use std::sync::Arc;
use tracing::instrument;

use crate::error::WeatherError;
use crate::location::Location;
use crate::types::WeatherObservation;

const FORECAST_PATH: &str = "/v1/forecast";
const USER_AGENT: &str = concat!("Homagama/", env!("CARGO_PKG_VERSION"));

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,temperature_2m_mean,\
precipitation_sum,precipitation_probability_max,windspeed_10m_max,\
relative_humidity_2m_max,uv_index_max,weathercode";
const HOURLY_FIELDS: &str =
    "temperature_2m,precipitation_probability,windspeed_10m,relative_humidity_2m";

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    location: Location,
}

impl WeatherProvider {
    /// Location and API host both come from the `[weather]` config section.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(Location::from_config(config), &config.base_url)
    }

    /// Point the provider at a different API host (mirrors, mock servers).
    pub fn with_base_url(location: Location, base_url: &str) -> Result<Self, WeatherError> {
        // No timeout: a request waits until the transport resolves or fails.
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            location,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Full forecast URL for the configured location
    pub fn forecast_url(&self) -> String {
        format!(
            "{}{}?latitude={}&longitude={}&daily={}&hourly={}&timezone=auto",
            self.base_url,
            FORECAST_PATH,
            self.location.latitude,
            self.location.longitude,
            DAILY_FIELDS,
            HOURLY_FIELDS
        )
    }

    /// Fetch today's daily aggregates and hourly series.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self) -> Result<WeatherObservation, WeatherError> {
        tracing::info!("Fetching meteorological data from Open-Meteo");

        let response = self.client.get(self.forecast_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather API returned status {}", status);
            return Err(WeatherError::from_status(status));
        }

        let body = response.text().await?;
        let observation: WeatherObservation = serde_json::from_str(&body)?;

        tracing::debug!(
            days = observation.daily.time.len(),
            hours = observation.hourly.time.len(),
            "Weather data received"
        );
        Ok(observation)
    }
}
