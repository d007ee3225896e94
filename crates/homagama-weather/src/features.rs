//! Feature extraction: turns a raw observation into the fixed-shape record
//! the prediction service consumes.
//!
//! Day-of-year is measured from local midnight of Dec 31 of the previous year
//! by subtracting instants and floor-dividing by 24h. Wherever the request
//! instant and the anchor sit at different UTC offsets (DST, or a date-only
//! timestamp read as UTC midnight west of Greenwich) the result is one lower
//! than the calendar ordinal. That behaviour is what the prediction model was
//! trained against, so it is kept as-is.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use serde::Serialize;

use crate::error::WeatherError;
use crate::types::WeatherObservation;

/// Number of hourly samples forwarded per series
pub const HOURLY_SAMPLES: usize = 24;

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Numeric input for the prediction service.
///
/// Serialized field names are the service's wire names. NaN values serialize
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub tavg: f64,
    pub tmin: f64,
    pub tmax: f64,
    pub prcp: f64,
    pub temp_range: f64,
    pub month: u32,
    pub day_of_year: i64,
    pub hourly_temps: Vec<f64>,
    pub hourly_rain_prob: Vec<f64>,
    pub hourly_wind: Vec<f64>,
    pub hourly_humidity: Vec<f64>,
}

impl FeatureRecord {
    /// Build the record for an observation whose request date has already
    /// been resolved (see [`request_date`]).
    pub fn from_observation<Tz: TimeZone>(
        observation: &WeatherObservation,
        date: &DateTime<Tz>,
    ) -> Result<Self, WeatherError> {
        let daily = &observation.daily;
        let tmax = first_entry(&daily.temperature_2m_max, "daily.temperature_2m_max")?;
        let tmin = first_entry(&daily.temperature_2m_min, "daily.temperature_2m_min")?;
        let prcp = first_entry(&daily.precipitation_sum, "daily.precipitation_sum")?;

        let hourly = &observation.hourly;
        let hourly_temps = hourly_prefix(&hourly.temperature_2m, "hourly.temperature_2m")?;
        let hourly_rain_prob = hourly_prefix(
            &hourly.precipitation_probability,
            "hourly.precipitation_probability",
        )?;
        let hourly_wind = hourly_prefix(&hourly.windspeed_10m, "hourly.windspeed_10m")?;
        let hourly_humidity =
            hourly_prefix(&hourly.relative_humidity_2m, "hourly.relative_humidity_2m")?;

        let day_of_year = day_of_year(date)
            .ok_or_else(|| WeatherError::InvalidDate(format!("{:?}", date.naive_local())))?;

        Ok(Self {
            // From the daily aggregate, not temperature_2m_mean
            tavg: (tmax + tmin) / 2.0,
            tmin,
            tmax,
            prcp,
            temp_range: tmax - tmin,
            month: date.month(),
            day_of_year,
            hourly_temps,
            hourly_rain_prob,
            hourly_wind,
            hourly_humidity,
        })
    }
}

/// Resolve the request date and extract features in one step.
pub fn extract_features<Tz: TimeZone>(
    observation: &WeatherObservation,
    tz: &Tz,
) -> Result<FeatureRecord, WeatherError> {
    let date = request_date(observation, tz)?;
    FeatureRecord::from_observation(observation, &date)
}

/// The instant of `daily.time[0]`, viewed in `tz`.
pub fn request_date<Tz: TimeZone>(
    observation: &WeatherObservation,
    tz: &Tz,
) -> Result<DateTime<Tz>, WeatherError> {
    let raw = observation
        .daily
        .time
        .first()
        .ok_or_else(|| WeatherError::MissingField("daily.time".to_string()))?;

    parse_timestamp(raw, tz).ok_or_else(|| WeatherError::InvalidDate(raw.clone()))
}

/// Parse an API timestamp.
///
/// - `YYYY-MM-DD` is UTC midnight of that date
/// - `YYYY-MM-DDTHH:MM[:SS]` without offset is wall-clock time in `tz`
/// - RFC 3339 keeps its own offset
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let utc = date.and_hms_opt(0, 0, 0)?.and_utc();
        return Some(utc.with_timezone(tz));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| resolve_local(tz, naive))
}

/// Ordinal day relative to local midnight of Dec 31 of the previous year.
///
/// Returns `None` only when the anchor year is out of chrono's range.
pub fn day_of_year<Tz: TimeZone>(date: &DateTime<Tz>) -> Option<i64> {
    let tz = date.timezone();
    let anchor = NaiveDate::from_ymd_opt(date.year() - 1, 12, 31)?.and_hms_opt(0, 0, 0)?;
    let anchor = resolve_local(&tz, anchor)?;

    let diff_ms = date.timestamp_millis() - anchor.timestamp_millis();
    Some(diff_ms.div_euclid(MS_PER_DAY))
}

/// Map a wall-clock time to an instant: ambiguous times take the earlier
/// instant, times inside a spring-forward gap move an hour later.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => match tz.from_local_datetime(&(naive + TimeDelta::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            LocalResult::None => None,
        },
    }
}

fn first_entry(values: &[f64], field: &str) -> Result<f64, WeatherError> {
    values
        .first()
        .copied()
        .ok_or_else(|| WeatherError::MissingField(field.to_string()))
}

fn hourly_prefix(values: &[f64], field: &str) -> Result<Vec<f64>, WeatherError> {
    if values.is_empty() {
        return Err(WeatherError::MissingField(field.to_string()));
    }
    Ok(values.iter().take(HOURLY_SAMPLES).copied().collect())
}
