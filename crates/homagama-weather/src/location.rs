use homagama_core::WeatherConfig;

/// The single geographic point forecasts are requested for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_config(config: &WeatherConfig) -> Self {
        Self::new(config.latitude, config.longitude)
    }

    /// e.g. "6.844°N"
    pub fn latitude_label(&self) -> String {
        let hemisphere = if self.latitude < 0.0 { 'S' } else { 'N' };
        format!("{}\u{00B0}{}", self.latitude.abs(), hemisphere)
    }

    /// e.g. "80.003°E"
    pub fn longitude_label(&self) -> String {
        let hemisphere = if self.longitude < 0.0 { 'W' } else { 'E' };
        format!("{}\u{00B0}{}", self.longitude.abs(), hemisphere)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_config(&WeatherConfig::default())
    }
}
