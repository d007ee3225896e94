//! Presentation side of the Homagama predictor.
//!
//! Formats a prediction and its weather observation into display strings,
//! and drives the fetch/predict workflow through a [`PresentationPort`] so
//! the pipeline never touches a concrete rendering surface.

pub mod format;
pub mod hourly;
pub mod port;
pub mod terminal;
pub mod view_model;
pub mod workflow;

pub use hourly::{render_hourly, HourlyEntry, HourlyRows};
pub use port::{BusyGuard, PresentationPort};
pub use terminal::TerminalPresenter;
pub use view_model::{build_view_model, QuickStats, Theme, ViewModel};
pub use workflow::PredictionWorkflow;
