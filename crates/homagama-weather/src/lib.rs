//! Weather observations for Homagama
//!
//! Fetches the daily aggregates and hourly series from the Open-Meteo API
//! for one fixed location, and derives the feature record handed to the
//! prediction service.

pub mod error;
pub mod features;
pub mod location;
pub mod provider;
pub mod types;

pub use error::WeatherError;
pub use features::{day_of_year, extract_features, request_date, FeatureRecord, HOURLY_SAMPLES};
pub use location::Location;
pub use provider::WeatherProvider;
pub use types::*;
