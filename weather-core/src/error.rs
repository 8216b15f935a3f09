use thiserror::Error;

/// Failures surfaced by the catalog and forecast capabilities.
///
/// The controller never lets these reach observers: they are logged and
/// translated into an empty city list or an absent forecast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("{what} unavailable: {reason}")]
    DataUnavailable { what: String, reason: String },

    #[error("City catalog is empty, no city to select")]
    EmptyCatalog,
}

impl ForecastError {
    pub fn cities_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable { what: "cities".to_string(), reason: reason.into() }
    }

    pub fn forecast_unavailable(city: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable { what: format!("forecast for '{city}'"), reason: reason.into() }
    }

    /// Short message suitable for a placeholder in the view layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "Weather data is not available right now.",
            Self::EmptyCatalog => "No cities available.",
        }
    }
}
