use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Select, Text};
use serde_json::json;
use std::sync::Arc;
use weatherfy_core::{
    Config, ForecastController, ForecastError, Router, StartupCity, StaticCityCatalog,
    TemperatureDisplay, WeatherUnit, provider::provider_from_id,
};

use crate::{
    router::{CliRouter, Screen},
    view,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherfy", version, about = "City weather forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cities, optionally filtered by a case-insensitive substring.
    Cities {
        query: Option<String>,
    },

    /// Show the forecast for a city, or for the startup city when omitted.
    Show {
        city: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,

        /// Print the forecast as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search and pick cities interactively.
    Browse {
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Open a screen by route, e.g. `cities` or `forecast/Paris`.
    Open {
        path: String,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Choose unit system and startup city interactively.
    Configure,
}

#[derive(Debug, clap::Args)]
pub struct DisplayArgs {
    /// Unit system, overriding the configured one: "metric" or "imperial".
    #[arg(long, value_parser = parse_unit)]
    unit: Option<WeatherUnit>,

    /// Always print the full unit suffix (°C / °F).
    #[arg(long)]
    full_unit: bool,
}

fn parse_unit(value: &str) -> Result<WeatherUnit, String> {
    WeatherUnit::try_from(value).map_err(|e| e.to_string())
}

/// Resolved presentation settings.
#[derive(Debug, Clone, Copy)]
struct Presentation {
    unit: WeatherUnit,
    compressed: bool,
}

impl Presentation {
    fn new(config: &Config, args: &DisplayArgs) -> Self {
        Self {
            unit: args.unit.unwrap_or(config.unit),
            compressed: config.compress_unit && !args.full_unit,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Cities { query } => {
                let controller = build_controller(&config)?;
                controller.load_cities(query.as_deref().unwrap_or_default()).await;
                println!("{}", view::render_cities(&controller.cities().get()));
            }
            Command::Show { city, display, json } => {
                let presentation = Presentation::new(&config, &display);
                let controller = build_controller(&config)?;
                show(&controller, city.as_deref(), presentation, json).await;
            }
            Command::Browse { display } => {
                let presentation = Presentation::new(&config, &display);
                browse(Arc::new(build_controller(&config)?), presentation).await?;
            }
            Command::Open { path, display } => {
                let presentation = Presentation::new(&config, &display);
                let (command, values) = CliRouter::parse_path(&path)?;
                let controller = build_controller(&config)?;

                match CliRouter.navigate(&command, &values)? {
                    None => tracing::debug!(path = %path, "no navigation requested"),
                    Some(Screen::Cities) => {
                        controller.load_cities("").await;
                        println!("{}", view::render_cities(&controller.cities().get()));
                    }
                    Some(Screen::Forecast { city }) => {
                        show(&controller, Some(city.as_str()), presentation, false).await;
                    }
                }
            }
            Command::Configure => configure(config).await?,
        }

        Ok(())
    }
}

fn build_controller(config: &Config) -> Result<ForecastController> {
    let provider = provider_from_id(config.provider_id()?);
    Ok(ForecastController::new(Arc::new(StaticCityCatalog::new()), provider)
        .with_startup(config.startup))
}

async fn show(
    controller: &ForecastController,
    city: Option<&str>,
    presentation: Presentation,
    json: bool,
) {
    let outcome = match city {
        Some(city) => controller.select_city(city).await.map(|_| ()),
        None => controller.init().await.map(|_| ()),
    };
    if let Err(err) = outcome {
        eprintln!("{}", err.user_message());
    }

    let forecast = controller.forecast().get();
    if json {
        let display = forecast.as_ref().map(|f| TemperatureDisplay::new(f, presentation.unit));
        let output = json!({ "forecast": forecast, "display": display });
        println!("{output:#}");
    } else {
        println!(
            "{}",
            view::render_forecast(forecast.as_ref(), presentation.unit, presentation.compressed)
        );
    }
}

async fn browse(controller: Arc<ForecastController>, presentation: Presentation) -> Result<()> {
    // The forecast cell drives the output; selections just trigger fetches.
    let _view = controller.forecast().subscribe(move |forecast| {
        if let Some(forecast) = forecast {
            println!(
                "\n{}\n",
                view::render_forecast(Some(forecast), presentation.unit, presentation.compressed)
            );
        }
    });

    match controller.init().await {
        Ok(_) | Err(ForecastError::DataUnavailable { .. }) => {}
        Err(ForecastError::EmptyCatalog) => {
            println!("{}", view::NO_CITIES);
            return Ok(());
        }
    }

    loop {
        let query = prompt(|| Text::new("Search city (empty for all):").prompt()).await?;
        let Some(query) = query else { break };

        let cities = controller.load_cities(&query).await;
        if cities.is_empty() {
            println!("{}", view::NO_CITIES);
            continue;
        }

        let picked = prompt(move || Select::new("City:", cities).prompt()).await?;
        let Some(city) = picked else { break };

        if let Err(err) = controller.select_city(&city).await {
            println!("{}", err.user_message());
        }

        let again = prompt(|| Confirm::new("Look up another city?").with_default(true).prompt())
            .await?;
        if again != Some(true) {
            break;
        }
    }

    Ok(())
}

async fn configure(mut config: Config) -> Result<()> {
    let unit = prompt(|| Select::new("Unit system:", WeatherUnit::all().to_vec()).prompt()).await?;
    let Some(unit) = unit else { return Ok(()) };

    let startup = prompt(|| {
        Select::new("City shown at startup:", vec!["first in list", "catalog default"]).prompt()
    })
    .await?;
    let Some(startup) = startup else { return Ok(()) };

    let compress = prompt(|| {
        Confirm::new("Short unit suffix (°) on the main temperature?").with_default(true).prompt()
    })
    .await?;
    let Some(compress) = compress else { return Ok(()) };

    config.unit = unit;
    config.startup =
        if startup == "catalog default" { StartupCity::Default } else { StartupCity::First };
    config.compress_unit = compress;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// Run a blocking prompt off the async runtime. `None` means the user cancelled.
async fn prompt<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> inquire::error::InquireResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await.context("Prompt task failed")?;
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(InquireError::NotTTY) => bail!("Interactive commands need a terminal"),
        Err(err) => Err(err.into()),
    }
}
