//! Unit-aware temperature conversion and labels.
//!
//! Forecasts carry whole degrees Celsius. Imperial values are computed as
//! `celsius * 9 / 5 + 32` rounded to the nearest integer, ties away from zero.
//! Because the exact result is always a multiple of 0.2 a tie never actually
//! occurs, but the rule is the same for current, min and max temperatures.

use serde::Serialize;

use crate::model::{Forecast, WeatherUnit};

/// Convert a Celsius value for display in `unit`.
pub fn format_temperature(celsius: i32, unit: WeatherUnit) -> i32 {
    match unit {
        WeatherUnit::Metric => celsius,
        WeatherUnit::Imperial => saturate(div_round(i64::from(celsius) * 9 + 160, 5)),
    }
}

/// Inverse of [`format_temperature`], used to check conversions.
pub fn to_celsius(value: i32, unit: WeatherUnit) -> i32 {
    match unit {
        WeatherUnit::Metric => value,
        WeatherUnit::Imperial => saturate(div_round((i64::from(value) - 32) * 5, 9)),
    }
}

/// Append the compressed or normal unit suffix to an already converted value.
pub fn render_label(value: i32, unit: WeatherUnit, compressed: bool) -> String {
    let suffix = if compressed { unit.compressed_indication() } else { unit.normal_indication() };
    format!("{value}{suffix}")
}

// Integer division rounding to nearest, ties away from zero. `d` is positive.
fn div_round(n: i64, d: i64) -> i64 {
    let half = d / 2;
    if n >= 0 { (n + half) / d } else { (n - half) / d }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value > 0 { i32::MAX } else { i32::MIN })
}

/// Display-ready temperatures for one forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureDisplay {
    pub unit: WeatherUnit,
    pub temperature: i32,
    pub min_temperature: Option<i32>,
    pub max_temperature: Option<i32>,
}

impl TemperatureDisplay {
    pub fn new(forecast: &Forecast, unit: WeatherUnit) -> Self {
        Self {
            unit,
            temperature: format_temperature(forecast.temperature, unit),
            min_temperature: forecast.min_temperature.map(|t| format_temperature(t, unit)),
            max_temperature: forecast.max_temperature.map(|t| format_temperature(t, unit)),
        }
    }

    /// Headline label, e.g. `21°` or `21°C`.
    pub fn headline(&self, compressed: bool) -> String {
        render_label(self.temperature, self.unit, compressed)
    }

    /// `(max, min)` labels with the normal suffix. Shown only when both exist.
    pub fn max_and_min(&self) -> Option<(String, String)> {
        match (self.max_temperature, self.min_temperature) {
            (Some(max), Some(min)) => Some((
                render_label(max, self.unit, false),
                render_label(min, self.unit, false),
            )),
            _ => None,
        }
    }

    /// Single-line rendering: headline, then `↑max ↓min` when available.
    pub fn render(&self, compressed: bool) -> String {
        match self.max_and_min() {
            Some((max, min)) => format!("{} ↑{max} ↓{min}", self.headline(compressed)),
            None => self.headline(compressed),
        }
    }
}
