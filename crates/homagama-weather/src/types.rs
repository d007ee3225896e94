use homagama_core::numeric::lenient_f64_seq;
use serde::Deserialize;

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::Sleet, // Freezing drizzle
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            66 | 67 => Self::Sleet, // Freezing rain
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Condition for a coerced code; `None` when the code is missing.
    pub fn from_code_value(code: f64) -> Option<Self> {
        if code.is_finite() {
            Some(Self::from_wmo_code(code.trunc() as i32))
        } else {
            None
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// First value of a series, or NaN when the series is empty.
pub fn first_or_nan(values: &[f64]) -> f64 {
    values.first().copied().unwrap_or(f64::NAN)
}

/// Daily aggregates as returned by Open-Meteo, one entry per day.
///
/// Index 0 is today. Missing or null values read as NaN.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyAggregate {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub temperature_2m_mean: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub precipitation_sum: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub precipitation_probability_max: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub windspeed_10m_max: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub relative_humidity_2m_max: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub uv_index_max: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub weathercode: Vec<f64>,
}

impl DailyAggregate {
    /// Today's weather condition, if a code was reported
    pub fn condition(&self) -> Option<WeatherCondition> {
        WeatherCondition::from_code_value(first_or_nan(&self.weathercode))
    }
}

/// Hourly series aligned by index to `time`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub temperature_2m: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub precipitation_probability: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub windspeed_10m: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub relative_humidity_2m: Vec<f64>,
}

/// Raw forecast payload from the weather API.
///
/// Open-Meteo's `timezone` field is not read: timestamps are interpreted in
/// the display zone the caller passes to feature extraction and rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherObservation {
    pub daily: DailyAggregate,
    pub hourly: HourlySeries,
}
