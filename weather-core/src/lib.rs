//! Core library for the `weatherfy` forecast app.
//!
//! This crate defines:
//! - The city catalog and the forecast provider capabilities
//! - Unit-aware temperature conversion and labels
//! - Observable state cells and the forecast controller that drives them
//! - Navigation descriptors consumed by a routing front end
//! - Configuration handling
//!
//! It is used by `weatherfy-cli`, but the controller and its state cells can
//! back any view layer that renders already-computed display values.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod navigation;
pub mod provider;
pub mod state;
pub mod temperature;

pub use catalog::{CityRepository, StaticCityCatalog};
pub use config::Config;
pub use controller::{ForecastController, StartupCity};
pub use error::ForecastError;
pub use model::{Forecast, WeatherCondition, WeatherUnit};
pub use navigation::{ArgumentType, NamedArgument, NavigationCommand, Route, Router};
pub use provider::{ForecastProvider, ProviderId};
pub use state::{StateCell, Subscription};
pub use temperature::{TemperatureDisplay, format_temperature, render_label};
