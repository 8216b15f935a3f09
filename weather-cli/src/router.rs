use weatherfy_core::{
    NavigationCommand, Route, Router,
    navigation::{ArgValue, ForecastDirections, NavigationError},
};

/// Screens the terminal front end can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Cities,
    Forecast { city: String },
}

#[derive(Debug, Default)]
pub struct CliRouter;

impl CliRouter {
    /// Split a path like `forecast/Paris` into its command and argument values.
    ///
    /// An empty path maps to the default command, i.e. no navigation.
    pub fn parse_path(path: &str) -> Result<(NavigationCommand, Vec<&str>), NavigationError> {
        let mut segments = path.trim_matches('/').split('/').filter(|s| !s.is_empty());

        let command = match segments.next() {
            None => NavigationCommand::Default,
            Some(ForecastDirections::CITIES) => ForecastDirections::cities(),
            Some(ForecastDirections::FORECAST) => ForecastDirections::forecast(),
            Some(other) => return Err(NavigationError::UnknownDestination(other.to_string())),
        };

        Ok((command, segments.collect()))
    }
}

impl Router for CliRouter {
    type Screen = Screen;

    fn screen_for(&self, route: &Route) -> Result<Screen, NavigationError> {
        match route.destination.as_str() {
            ForecastDirections::CITIES => Ok(Screen::Cities),
            ForecastDirections::FORECAST => {
                let city = route
                    .get(ForecastDirections::CITY_ARG)
                    .and_then(ArgValue::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(Screen::Forecast { city })
            }
            other => Err(NavigationError::UnknownDestination(other.to_string())),
        }
    }
}
