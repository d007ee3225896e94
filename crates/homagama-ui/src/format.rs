//! Display formatting for every number and timestamp the UI shows.
//!
//! These outputs are compared against the existing web display, so the
//! rounding rules are the JavaScript ones: `toFixed` for fixed decimals and
//! `Math.round` for percentages. Non-finite input renders as [`PLACEHOLDER`].

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Shown wherever a value is missing or not finite
pub const PLACEHOLDER: &str = "--";

/// e.g. "28.0°C"
pub fn format_degrees(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}\u{00B0}C", to_fixed(value, 1))
}

/// e.g. "63%"
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.0}%", round_half_up(value))
}

/// e.g. "4.3 mm"
pub fn format_millimeters(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{} mm", to_fixed(value, 1))
}

/// e.g. "12.5 km/h"
pub fn format_speed(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{} km/h", to_fixed(value, 1))
}

/// e.g. "7.0"
pub fn format_uv(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    to_fixed(value, 1)
}

/// e.g. "3:04 PM"
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%-I:%M %p").to_string()
}

/// e.g. "Saturday, June 15, 2024"
pub fn format_long_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Sat"
pub fn format_short_weekday<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%a").to_string()
}

/// Fixed-point text with `toFixed` semantics.
///
/// Differs from `format!("{:.N}")` in two places: exact binary ties round
/// away from zero (0.25 -> "0.3"), and the sign is decided before rounding
/// (-0.04 -> "-0.0", while -0.0 -> "0.0").
pub fn to_fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let text = if is_exact_tie(magnitude, digits) {
        let half_step = 0.5 / 10f64.powi(digits as i32);
        format!("{:.*}", digits, magnitude + half_step)
    } else {
        format!("{:.*}", digits, magnitude)
    };

    if value < 0.0 {
        format!("-{}", text)
    } else {
        text
    }
}

/// True when `magnitude` sits exactly halfway between two `digits`-place
/// decimals, i.e. `magnitude * 2^(digits+1)` is an odd integer.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    let scaled = magnitude * 2f64.powi(digits as i32 + 1);
    scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// `Math.round`: halves go toward positive infinity, and negative zero is
/// folded into zero.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded + 0.0
}
