use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::ForecastError,
    model::{Forecast, WeatherCondition},
};

use super::ForecastProvider;

/// Offline provider that derives a stable forecast from the city name.
///
/// The same name always yields the same temperatures and condition, so the
/// app behaves identically across runs without any network access. Names
/// outside the catalog still get a forecast.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleForecastProvider;

impl SampleForecastProvider {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, city: &str) -> Forecast {
        let seed = fnv1a(city.trim().to_lowercase().as_bytes());
        let pick = |shift: u32, modulo: u64| (seed >> shift) % modulo;

        let temperature = pick(0, 45) as i32 - 10;
        let below = pick(8, 6) as i32;
        let above = pick(16, 6) as i32;

        let conditions = WeatherCondition::all();
        let condition = conditions[pick(24, conditions.len() as u64) as usize];

        Forecast {
            city: city.to_string(),
            temperature,
            min_temperature: Some(temperature - below),
            max_temperature: Some(temperature + above),
            condition,
            description: condition.description().to_string(),
            humidity_pct: 30 + pick(32, 60) as u8,
            wind_speed_kph: pick(40, 40) as u16,
            date: Utc::now().date_naive(),
        }
    }
}

#[async_trait]
impl ForecastProvider for SampleForecastProvider {
    async fn get_forecast(&self, city: &str) -> Result<Forecast, ForecastError> {
        if city.trim().is_empty() {
            return Err(ForecastError::forecast_unavailable(city, "city name is empty"));
        }

        let forecast = self.build(city);
        tracing::debug!(city, temperature = forecast.temperature, "sample forecast");
        Ok(forecast)
    }
}

// 64-bit FNV-1a; stable across builds, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CITIES;

    #[tokio::test]
    async fn forecast_is_for_requested_city() {
        let forecast = SampleForecastProvider::new().get_forecast("Paris").await.expect("sample");
        assert_eq!(forecast.city, "Paris");
        assert_eq!(forecast.description, forecast.condition.description());
    }

    #[tokio::test]
    async fn same_city_same_forecast() {
        let provider = SampleForecastProvider::new();
        let a = provider.get_forecast("Lisbon").await.expect("sample");
        let b = provider.get_forecast("lisbon ").await.expect("sample");
        assert_eq!(a.temperature, b.temperature);
        assert_eq!(a.condition, b.condition);
    }

    #[tokio::test]
    async fn every_catalog_city_has_a_sane_forecast() {
        let provider = SampleForecastProvider::new();
        for city in CITIES {
            let f = provider.get_forecast(city).await.expect("sample");
            assert!((-10..=34).contains(&f.temperature), "{city}: {}", f.temperature);
            let (min, max) = (f.min_temperature.expect("min"), f.max_temperature.expect("max"));
            assert!(min <= f.temperature && f.temperature <= max);
            assert!((30..90).contains(&f.humidity_pct));
        }
    }

    #[tokio::test]
    async fn unknown_city_gets_best_effort_forecast() {
        let forecast =
            SampleForecastProvider::new().get_forecast("Atlantis").await.expect("best effort");
        assert_eq!(forecast.city, "Atlantis");
    }

    #[tokio::test]
    async fn blank_city_is_unavailable() {
        let err = SampleForecastProvider::new().get_forecast("  ").await.unwrap_err();
        assert!(matches!(err, ForecastError::DataUnavailable { .. }));
    }

    #[test]
    fn fnv1a_known_vector() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
