//! Prediction service response types.
//!
//! Nothing here is schema-checked: every number is coerced leniently and a
//! missing value reads as NaN, which the formatters render as a placeholder.

use homagama_core::numeric::{lenient_f64, nan};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Today's observations as echoed back by the service.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TodayData {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub temp_max: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub temp_min: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub temp_avg: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub precipitation: f64,
}

impl Default for TodayData {
    fn default() -> Self {
        Self {
            temp_max: f64::NAN,
            temp_min: f64::NAN,
            temp_avg: f64::NAN,
            precipitation: f64::NAN,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResult {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub predicted_temp: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub predicted_rain_chance: f64,
    /// Anything other than a JSON object means "nothing echoed"
    #[serde(default, deserialize_with = "lenient_today")]
    today_data: Option<TodayData>,
}

/// Reads `today_data` without failing the whole response: non-objects
/// (`null`, strings, arrays, numbers) become `None`.
fn lenient_today<'de, D>(deserializer: D) -> Result<Option<TodayData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl PredictionResult {
    pub fn new(predicted_temp: f64, predicted_rain_chance: f64, today: TodayData) -> Self {
        Self {
            predicted_temp,
            predicted_rain_chance,
            today_data: Some(today),
        }
    }

    /// Echoed observations, with every field NaN when the service sent none
    pub fn today(&self) -> TodayData {
        self.today_data.unwrap_or_default()
    }
}
