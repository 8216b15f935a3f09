//! Forecast controller: the view-model behind the city list and forecast.
//!
//! Owns two independent [`StateCell`]s, `cities` and `forecast`. Each fetch is
//! tagged with a per-cell sequence number. A completion is discarded when a
//! newer fetch for the same cell is still running or has already published.
//! Fetches that are dropped before finishing are forgotten.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, sync::Arc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    catalog::CityRepository,
    error::ForecastError,
    model::{City, Forecast},
    provider::ForecastProvider,
    state::StateCell,
};

/// Which city is selected once the initial city list has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupCity {
    /// First entry of the full catalog.
    #[default]
    First,
    /// The catalog's designated default city, falling back to the first entry.
    Default,
}

#[derive(Debug, Default)]
struct SequenceState {
    next: u64,
    /// Requests issued and neither completed nor dropped.
    live: BTreeSet<u64>,
    published: u64,
}

/// Request ordering for one state cell.
#[derive(Debug, Default)]
struct Sequencer {
    state: Mutex<SequenceState>,
    /// Held while publishing so accepted completions reach the cell in order.
    publish: Mutex<()>,
}

impl Sequencer {
    fn issue(&self) -> Ticket<'_> {
        let mut state = self.state.lock();
        state.next += 1;
        let seq = state.next;
        state.live.insert(seq);
        Ticket { sequencer: self, seq }
    }

    fn in_flight(&self) -> bool {
        !self.state.lock().live.is_empty()
    }
}

/// One outstanding request. Dropping it without completing abandons the
/// request, so it no longer holds back older completions or the loading flag.
#[derive(Debug)]
struct Ticket<'a> {
    sequencer: &'a Sequencer,
    seq: u64,
}

impl Ticket<'_> {
    fn seq(&self) -> u64 {
        self.seq
    }

    /// Run `publish` unless a newer request is still live or has already
    /// published. Returns whether it ran.
    fn complete(self, publish: impl FnOnce()) -> bool {
        let _publishing = self.sequencer.publish.lock();
        let accepted = {
            let mut state = self.sequencer.state.lock();
            state.live.remove(&self.seq);
            let superseded =
                self.seq < state.published || state.live.range(self.seq + 1..).next().is_some();
            if !superseded {
                state.published = self.seq;
            }
            !superseded
        };

        if accepted {
            publish();
        }
        accepted
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        self.sequencer.state.lock().live.remove(&self.seq);
    }
}

#[derive(Debug)]
pub struct ForecastController {
    city_repository: Arc<dyn CityRepository>,
    forecast_provider: Arc<dyn ForecastProvider>,
    startup: StartupCity,
    cities: StateCell<Vec<City>>,
    forecast: StateCell<Option<Forecast>>,
    cities_seq: Sequencer,
    forecast_seq: Sequencer,
}

impl ForecastController {
    /// Build an idle controller. Call [`init`](Self::init) or use
    /// [`spawn`](Self::spawn) to run the startup sequence.
    pub fn new(
        city_repository: Arc<dyn CityRepository>,
        forecast_provider: Arc<dyn ForecastProvider>,
    ) -> Self {
        Self {
            city_repository,
            forecast_provider,
            startup: StartupCity::default(),
            cities: StateCell::new(Vec::new()),
            forecast: StateCell::new(None),
            cities_seq: Sequencer::default(),
            forecast_seq: Sequencer::default(),
        }
    }

    pub fn with_startup(mut self, startup: StartupCity) -> Self {
        self.startup = startup;
        self
    }

    /// Construct the controller and run [`init`](Self::init) in the background.
    pub fn spawn(
        city_repository: Arc<dyn CityRepository>,
        forecast_provider: Arc<dyn ForecastProvider>,
        startup: StartupCity,
    ) -> (Arc<Self>, JoinHandle<Result<City, ForecastError>>) {
        let controller =
            Arc::new(Self::new(city_repository, forecast_provider).with_startup(startup));
        let worker = Arc::clone(&controller);
        let handle = tokio::spawn(async move { worker.init().await });
        (controller, handle)
    }

    /// Observable list of cities matching the last query.
    pub fn cities(&self) -> &StateCell<Vec<City>> {
        &self.cities
    }

    /// Observable forecast of the selected city; `None` until one loads or
    /// after a failed fetch.
    pub fn forecast(&self) -> &StateCell<Option<Forecast>> {
        &self.forecast
    }

    pub fn is_loading_cities(&self) -> bool {
        self.cities_seq.in_flight()
    }

    pub fn is_loading_forecast(&self) -> bool {
        self.forecast_seq.in_flight()
    }

    /// Load the full catalog, then select the startup city.
    ///
    /// An empty catalog leaves `forecast` absent and returns
    /// [`ForecastError::EmptyCatalog`].
    pub async fn init(&self) -> Result<City, ForecastError> {
        let cities = self.load_cities("").await;

        let city = match self.startup {
            StartupCity::First => cities.first().cloned(),
            StartupCity::Default => match self.city_repository.get_default_city().await {
                Ok(default) if cities.contains(&default) => Some(default),
                Ok(default) => {
                    warn!(city = %default, "default city missing from catalog, using first");
                    cities.first().cloned()
                }
                Err(err) => {
                    warn!(error = %err, "default city unavailable, using first");
                    cities.first().cloned()
                }
            },
        };

        let Some(city) = city else {
            warn!("city catalog is empty, no forecast selected");
            return Err(ForecastError::EmptyCatalog);
        };

        info!(city = %city, "startup selection");
        self.select_city(&city).await?;
        Ok(city)
    }

    /// Fetch cities matching `query` and publish them to `cities`.
    ///
    /// A failed fetch publishes an empty list. Returns what was fetched, even
    /// when a newer query superseded it and nothing was published.
    pub async fn load_cities(&self, query: &str) -> Vec<City> {
        let ticket = self.cities_seq.issue();
        let seq = ticket.seq();
        debug!(query, seq, "loading cities");

        let cities = match self.city_repository.get_cities(query).await {
            Ok(cities) => cities,
            Err(err) => {
                warn!(query, error = %err, "city lookup failed");
                Vec::new()
            }
        };

        let published = ticket.complete(|| self.cities.set(cities.clone()));
        if !published {
            warn!(query, seq, "discarding stale city list");
        }
        cities
    }

    /// Fetch the forecast for `city` and publish it to `forecast`.
    ///
    /// On failure `forecast` becomes absent and the error is returned to the
    /// caller; observers only ever see `None`.
    pub async fn select_city(&self, city: &str) -> Result<Forecast, ForecastError> {
        let ticket = self.forecast_seq.issue();
        let seq = ticket.seq();
        debug!(city, seq, "loading forecast");

        let result = self.forecast_provider.get_forecast(city).await;
        if let Err(err) = &result {
            warn!(city, error = %err, "forecast fetch failed");
        }

        let next = result.as_ref().ok().cloned();
        let published = ticket.complete(|| self.forecast.set(next));
        if !published {
            warn!(city, seq, "discarding stale forecast");
        }
        result
    }

    /// Fire-and-forget [`load_cities`](Self::load_cities), e.g. per keystroke.
    pub fn request_cities(self: &Arc<Self>, query: impl Into<String>) -> JoinHandle<Vec<City>> {
        let this = Arc::clone(self);
        let query = query.into();
        tokio::spawn(async move { this.load_cities(&query).await })
    }

    /// Fire-and-forget [`select_city`](Self::select_city).
    pub fn request_forecast(
        self: &Arc<Self>,
        city: impl Into<String>,
    ) -> JoinHandle<Result<Forecast, ForecastError>> {
        let this = Arc::clone(self);
        let city = city.into();
        tokio::spawn(async move { this.select_city(&city).await })
    }
}
