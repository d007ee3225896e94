//! Client for the Homagama prediction service.
//!
//! Posts a feature record and reads back the predicted temperature and rain
//! chance along with the service's echo of today's observations.

pub mod client;
pub mod error;
pub mod types;

pub use client::PredictionClient;
pub use error::PredictionError;
pub use types::{PredictionResult, TodayData};
