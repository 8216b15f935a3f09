use crate::{error::ForecastError, model::Forecast, provider::sample::SampleForecastProvider};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod sample;

/// Backing sources a [`ForecastProvider`] can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Sample,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Sample => "sample",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Sample]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "sample" => Ok(ProviderId::Sample),
            _ => {
                let supported: Vec<_> = ProviderId::all().iter().map(ProviderId::as_str).collect();
                Err(anyhow::anyhow!(
                    "Unknown provider '{value}'. Supported providers: {}.",
                    supported.join(", ")
                ))
            }
        }
    }
}

/// Produces a forecast for a single city.
///
/// Implementations have no side effects. They either return a forecast or
/// fail with [`ForecastError::DataUnavailable`].
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn get_forecast(&self, city: &str) -> Result<Forecast, ForecastError>;
}

/// Construct a provider for an explicit ProviderId.
pub fn provider_from_id(id: ProviderId) -> Arc<dyn ForecastProvider> {
    match id {
        ProviderId::Sample => Arc::new(SampleForecastProvider::new()),
    }
}
