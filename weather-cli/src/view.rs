use weatherfy_core::{Forecast, TemperatureDisplay, WeatherUnit};

pub const NO_FORECAST: &str = "No forecast available.";
pub const NO_CITIES: &str = "No cities found.";

/// Numbered city list, or a placeholder when empty.
pub fn render_cities(cities: &[String]) -> String {
    if cities.is_empty() {
        return NO_CITIES.to_string();
    }

    cities
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{:>3}. {city}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_forecast(forecast: Option<&Forecast>, unit: WeatherUnit, compressed: bool) -> String {
    let Some(forecast) = forecast else {
        return NO_FORECAST.to_string();
    };

    let display = TemperatureDisplay::new(forecast, unit);
    format!(
        "{}  {}\n{}\n{}  humidity {}%  wind {} km/h",
        forecast.city,
        forecast.date.format("%A, %-d %B"),
        display.render(compressed),
        forecast.description,
        forecast.humidity_pct,
        forecast.wind_speed_kph,
    )
}
