use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A selectable city. Identity is the name itself.
pub type City = String;

/// Weather snapshot for one city. Temperatures are whole degrees Celsius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    pub temperature: i32,
    pub min_temperature: Option<i32>,
    pub max_temperature: Option<i32>,
    pub condition: WeatherCondition,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_kph: u16,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Thunderstorm,
    Snowy,
    Foggy,
    Windy,
}

impl WeatherCondition {
    pub const fn all() -> &'static [WeatherCondition] {
        &[
            WeatherCondition::Sunny,
            WeatherCondition::PartlyCloudy,
            WeatherCondition::Cloudy,
            WeatherCondition::Rainy,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Snowy,
            WeatherCondition::Foggy,
            WeatherCondition::Windy,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snowy => "Snow",
            Self::Foggy => "Fog",
            Self::Windy => "Windy",
        }
    }
}

/// Unit system used to present temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherUnit {
    #[default]
    Metric,
    Imperial,
}

impl WeatherUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherUnit::Metric => "metric",
            WeatherUnit::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [WeatherUnit] {
        &[WeatherUnit::Metric, WeatherUnit::Imperial]
    }

    /// Suffix used where space is tight, e.g. the headline temperature.
    pub fn compressed_indication(&self) -> &'static str {
        "°"
    }

    pub fn normal_indication(&self) -> &'static str {
        match self {
            WeatherUnit::Metric => "°C",
            WeatherUnit::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for WeatherUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WeatherUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(WeatherUnit::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(WeatherUnit::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_as_str_roundtrip() {
        for unit in WeatherUnit::all() {
            let parsed = WeatherUnit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
    }

    #[test]
    fn unknown_unit_error() {
        let err = WeatherUnit::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit"));
    }

    #[test]
    fn indications_per_unit() {
        assert_eq!(WeatherUnit::Metric.normal_indication(), "°C");
        assert_eq!(WeatherUnit::Imperial.normal_indication(), "°F");
        assert_eq!(WeatherUnit::Imperial.compressed_indication(), "°");
    }

    #[test]
    fn forecast_serializes_condition_in_snake_case() {
        let forecast = Forecast {
            city: "Paris".into(),
            temperature: 12,
            min_temperature: None,
            max_temperature: Some(15),
            condition: WeatherCondition::PartlyCloudy,
            description: "Partly cloudy".into(),
            humidity_pct: 60,
            wind_speed_kph: 10,
            date: NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date"),
        };
        let json = serde_json::to_string(&forecast).expect("serialize");
        assert!(json.contains("\"condition\":\"partly_cloudy\""));
        assert!(json.contains("\"min_temperature\":null"));
    }
}
