//! The fetch, extract, predict, render pipeline.

use chrono::{Local, TimeZone, Utc};
use homagama_core::{App, AppError};
use homagama_prediction::PredictionClient;
use homagama_weather::{request_date, FeatureRecord, WeatherProvider};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::port::{BusyGuard, PresentationPort};
use crate::view_model::{build_view_model, ViewModel};

const CALCULATING_STATUS: &str = "Calculating the freshest forecast...";
const FAILURE_STATUS: &str = "Unable to load weather data right now.";

/// One prediction run per trigger, reported through a [`PresentationPort`].
///
/// Only one run may be in flight at a time; a trigger that arrives while a
/// run is pending is refused with [`AppError::Busy`].
pub struct PredictionWorkflow<Tz: TimeZone = Local> {
    weather: WeatherProvider,
    predictor: PredictionClient,
    tz: Tz,
    in_flight: AtomicBool,
}

impl<Tz: TimeZone> PredictionWorkflow<Tz>
where
    Tz::Offset: Display,
{
    pub fn new(weather: WeatherProvider, predictor: PredictionClient, tz: Tz) -> Self {
        Self {
            weather,
            predictor,
            tz,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wire both clients from the application's resolved configuration.
    pub fn from_app(app: &App, tz: Tz) -> Result<Self, AppError> {
        let weather = WeatherProvider::from_config(&app.config().weather)
            .map_err(|e| AppError::from(anyhow::Error::new(e)))?;
        let predictor = PredictionClient::new(app.prediction_url())
            .map_err(|e| AppError::from(anyhow::Error::new(e)))?;

        Ok(Self::new(weather, predictor, tz))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the pipeline once and report the outcome to `port`.
    ///
    /// The port sees `show_busy` first and `hide_busy` last, with exactly
    /// one of `show_results` or `show_error` in between.
    pub async fn run<P>(&self, port: &mut P) -> Result<ViewModel, AppError>
    where
        P: PresentationPort + ?Sized,
    {
        let Some(mut guard) = BusyGuard::acquire(port, &self.in_flight) else {
            tracing::warn!("Prediction already in flight, ignoring trigger");
            return Err(AppError::Busy);
        };

        guard.announce_status(CALCULATING_STATUS);

        match self.execute().await {
            Ok(view) => {
                guard.show_results(&view);
                guard.announce_status(&view.status);
                Ok(view)
            }
            Err(e) => {
                tracing::error!(error = %e, "Prediction workflow failed");
                guard.show_error(&e.user_message());
                guard.announce_status(FAILURE_STATUS);
                Err(e)
            }
        }
    }

    async fn execute(&self) -> Result<ViewModel, AppError> {
        let observation = self.weather.fetch().await?;

        let today = request_date(&observation, &self.tz)?;
        let features = FeatureRecord::from_observation(&observation, &today)?;
        tracing::info!(
            month = features.month,
            day_of_year = features.day_of_year,
            "Sending data to prediction model"
        );

        let prediction = self.predictor.predict(&features).await?;

        let updated_at = Utc::now().with_timezone(&self.tz);
        Ok(build_view_model(
            &prediction,
            &observation,
            self.weather.location(),
            &today,
            &updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homagama_core::Config;
    use homagama_weather::Location;

    #[test]
    fn test_from_app_uses_resolved_endpoint() {
        let app = App::with_config(Config::default());
        let workflow = PredictionWorkflow::from_app(&app, Utc).unwrap();

        assert_eq!(workflow.predictor.url(), app.prediction_url());
        assert_eq!(workflow.weather.location(), &Location::default());
        assert!(!workflow.is_busy());
    }

    #[test]
    fn test_from_app_uses_configured_weather_host() {
        let mut config = Config::default();
        config.weather.base_url = "http://127.0.0.1:8089".to_string();
        let app = App::with_config(config);

        let workflow = PredictionWorkflow::from_app(&app, Utc).unwrap();
        assert!(workflow
            .weather
            .forecast_url()
            .starts_with("http://127.0.0.1:8089/v1/forecast?"));
    }
}
