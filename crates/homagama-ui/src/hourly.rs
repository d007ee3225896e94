//! Hourly forecast rows.

use chrono::{TimeZone, Timelike};
use homagama_weather::{features::parse_timestamp, HourlySeries, HOURLY_SAMPLES};

use crate::format::{format_degrees, format_percent, format_speed};

/// One display row of the hourly table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyEntry {
    /// "HH:00", or "--:00" when the timestamp could not be read
    pub hour: String,
    pub temperature: String,
    pub rain: String,
    pub wind: String,
    pub humidity: String,
}

/// Lazy iterator over at most [`HOURLY_SAMPLES`] rows.
///
/// Rows are formatted on demand; cloning restarts from the clone's position
/// without touching the underlying series.
#[derive(Clone)]
pub struct HourlyRows<'a, Tz: TimeZone> {
    series: &'a HourlySeries,
    tz: Tz,
    next: usize,
    end: usize,
}

impl<Tz: TimeZone> HourlyRows<'_, Tz> {
    fn entry(&self, index: usize) -> HourlyEntry {
        let sample = |values: &[f64]| values.get(index).copied().unwrap_or(f64::NAN);

        let hour = self.series.time.get(index).and_then(|raw| parse_timestamp(raw, &self.tz));

        HourlyEntry {
            hour: match hour {
                Some(at) => format!("{:02}:00", at.hour()),
                None => "--:00".to_string(),
            },
            temperature: format_degrees(sample(&self.series.temperature_2m)),
            rain: format_percent(sample(&self.series.precipitation_probability)),
            wind: format_speed(sample(&self.series.windspeed_10m)),
            humidity: format_percent(sample(&self.series.relative_humidity_2m)),
        }
    }
}

impl<Tz: TimeZone> Iterator for HourlyRows<'_, Tz> {
    type Item = HourlyEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let entry = self.entry(self.next);
        self.next += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<Tz: TimeZone> ExactSizeIterator for HourlyRows<'_, Tz> {}

/// Rows for the first 24 timestamps of `series`, hours read in `tz`.
pub fn render_hourly<'a, Tz: TimeZone>(series: &'a HourlySeries, tz: &Tz) -> HourlyRows<'a, Tz> {
    HourlyRows {
        series,
        tz: tz.clone(),
        next: 0,
        end: series.time.len().min(HOURLY_SAMPLES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::Asia::Colombo;

    fn series(hours: usize) -> HourlySeries {
        HourlySeries {
            time: (0..hours)
                .map(|h| format!("2024-06-15T{:02}:00", h % 24))
                .collect(),
            temperature_2m: (0..hours).map(|h| 22.0 + h as f64 * 0.5).collect(),
            precipitation_probability: vec![40.0; hours],
            windspeed_10m: vec![12.25; hours],
            relative_humidity_2m: vec![85.0; hours],
        }
    }

    #[test]
    fn test_row_count_is_capped() {
        for (hours, expected) in [(0, 0), (1, 1), (5, 5), (24, 24), (48, 24)] {
            let data = series(hours);
            let rows = render_hourly(&data, &Colombo);
            assert_eq!(rows.len(), expected);
            assert_eq!(rows.count(), expected);
        }
    }

    #[test]
    fn test_first_row_formatting() {
        let data = series(24);
        let first = render_hourly(&data, &Colombo).next().unwrap();
        assert_eq!(
            first,
            HourlyEntry {
                hour: "00:00".to_string(),
                temperature: "22.0°C".to_string(),
                rain: "40%".to_string(),
                wind: "12.3 km/h".to_string(),
                humidity: "85%".to_string(),
            }
        );
    }

    #[test]
    fn test_hour_labels_follow_wall_clock() {
        let data = series(24);
        let labels: Vec<String> = render_hourly(&data, &Colombo).map(|row| row.hour).collect();
        assert_eq!(labels[9], "09:00");
        assert_eq!(labels[23], "23:00");
    }

    #[test]
    fn test_offset_timestamps_are_shown_in_display_zone() {
        let mut data = series(1);
        data.time[0] = "2024-06-15T00:00:00Z".to_string();
        let plus_five_thirty = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let row = render_hourly(&data, &plus_five_thirty).next().unwrap();
        assert_eq!(row.hour, "05:00");
    }

    #[test]
    fn test_missing_samples_render_placeholder() {
        let mut data = series(3);
        data.windspeed_10m.truncate(1);
        data.relative_humidity_2m = vec![f64::NAN; 3];
        data.time[2] = "not a time".to_string();

        let rows: Vec<HourlyEntry> = render_hourly(&data, &Colombo).collect();
        assert_eq!(rows[0].wind, "12.3 km/h");
        assert_eq!(rows[1].wind, "--");
        assert_eq!(rows[1].humidity, "--");
        assert_eq!(rows[2].hour, "--:00");
        assert_eq!(rows[2].temperature, "23.0°C");
    }

    #[test]
    fn test_clone_restarts_independently() {
        let data = series(4);
        let mut rows = render_hourly(&data, &Colombo);
        rows.next();
        let copy = rows.clone();

        assert_eq!(rows.len(), 3);
        assert_eq!(copy.map(|row| row.hour).collect::<Vec<_>>(), ["01:00", "02:00", "03:00"]);
        assert_eq!(render_hourly(&data, &Colombo).len(), 4);
    }
}
