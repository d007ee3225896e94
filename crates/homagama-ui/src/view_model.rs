//! View model: every string the results screen shows, computed up front.

use chrono::{DateTime, TimeZone};
use homagama_prediction::PredictionResult;
use homagama_weather::{first_or_nan, Location, WeatherObservation};
use std::fmt::{self, Display};

use crate::format::{
    format_degrees, format_long_date, format_millimeters, format_percent, format_short_weekday,
    format_speed, format_time, format_uv, PLACEHOLDER,
};
use crate::hourly::{render_hourly, HourlyEntry};

/// Rain chance at or above which the stormy theme is used
pub const STORMY_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Clear,
    Stormy,
}

impl Theme {
    /// NaN compares false and falls through to `Clear`
    pub fn from_rain_chance(chance: f64) -> Self {
        if chance >= STORMY_THRESHOLD {
            Self::Stormy
        } else {
            Self::Clear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Stormy => "stormy",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The summary strip at the top of the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStats {
    pub temperature: String,
    pub rain_chance: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub predicted_temp: String,
    pub predicted_rain: String,

    pub today_max: String,
    pub today_min: String,
    pub today_avg: String,
    pub today_precipitation: String,

    pub latitude: String,
    pub longitude: String,

    /// API's own daily mean, display only
    pub api_temp: String,
    pub api_date: String,
    pub condition: String,

    pub wind: String,
    pub humidity: String,
    pub uv_index: String,
    pub rain_probability: String,

    pub hourly: Vec<HourlyEntry>,
    pub quick_stats: QuickStats,
    pub theme: Theme,
    pub status: String,
}

impl ViewModel {
    /// Named display fields, keyed the way the web page keys its elements.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("pred-temp", self.predicted_temp.as_str()),
            ("pred-rain", self.predicted_rain.as_str()),
            ("today-tmax", self.today_max.as_str()),
            ("today-tmin", self.today_min.as_str()),
            ("today-tavg", self.today_avg.as_str()),
            ("today-prcp", self.today_precipitation.as_str()),
            ("api-lat", self.latitude.as_str()),
            ("api-lon", self.longitude.as_str()),
            ("api-temp", self.api_temp.as_str()),
            ("api-date", self.api_date.as_str()),
            ("api-condition", self.condition.as_str()),
            ("atmo-wind", self.wind.as_str()),
            ("atmo-humidity", self.humidity.as_str()),
            ("atmo-uv", self.uv_index.as_str()),
            ("atmo-rain-prob", self.rain_probability.as_str()),
            ("quick-temp", self.quick_stats.temperature.as_str()),
            ("quick-rain", self.quick_stats.rain_chance.as_str()),
            ("quick-updated", self.quick_stats.updated_at.as_str()),
            ("theme", self.theme.as_str()),
            ("hero-status", self.status.as_str()),
        ]
    }

    /// Look up a single named field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Build the view model.
///
/// `today` is the request instant (from `daily.time[0]`) and `updated_at`
/// the wall-clock time of this refresh, both in the display zone.
pub fn build_view_model<Tz: TimeZone>(
    prediction: &PredictionResult,
    observation: &WeatherObservation,
    location: &Location,
    today: &DateTime<Tz>,
    updated_at: &DateTime<Tz>,
) -> ViewModel
where
    Tz::Offset: Display,
{
    let echoed = prediction.today();
    let daily = &observation.daily;

    let predicted_temp = format_degrees(prediction.predicted_temp);
    let predicted_rain = format_percent(prediction.predicted_rain_chance);
    let updated_time = format_time(updated_at);

    ViewModel {
        today_max: format_degrees(echoed.temp_max),
        today_min: format_degrees(echoed.temp_min),
        today_avg: format_degrees(echoed.temp_avg),
        today_precipitation: format_millimeters(echoed.precipitation),

        latitude: location.latitude_label(),
        longitude: location.longitude_label(),

        api_temp: format_degrees(first_or_nan(&daily.temperature_2m_mean)),
        api_date: format_long_date(today),
        condition: daily
            .condition()
            .map(|c| c.description().to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),

        wind: format_speed(first_or_nan(&daily.windspeed_10m_max)),
        humidity: format_percent(first_or_nan(&daily.relative_humidity_2m_max)),
        uv_index: format_uv(first_or_nan(&daily.uv_index_max)),
        rain_probability: format_percent(first_or_nan(&daily.precipitation_probability_max)),

        hourly: render_hourly(&observation.hourly, &today.timezone()).collect(),
        quick_stats: QuickStats {
            temperature: predicted_temp.clone(),
            rain_chance: predicted_rain.clone(),
            updated_at: updated_time.clone(),
        },
        theme: Theme::from_rain_chance(prediction.predicted_rain_chance),
        status: format!("Updated {} at {}", format_short_weekday(updated_at), updated_time),

        predicted_temp,
        predicted_rain,
    }
}
