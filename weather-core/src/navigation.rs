//! Navigation descriptors handed to a routing front end.

use std::fmt;
use thiserror::Error;

/// Declared type of a route argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    String,
    Int,
    Long,
    Float,
    Bool,
}

impl ArgumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Int => "int",
            ArgumentType::Long => "long",
            ArgumentType::Float => "float",
            ArgumentType::Bool => "bool",
        }
    }

    fn parse(&self, raw: &str) -> Option<ArgValue> {
        Some(match self {
            ArgumentType::String => ArgValue::String(raw.to_string()),
            ArgumentType::Int => ArgValue::Int(raw.parse().ok()?),
            ArgumentType::Long => ArgValue::Long(raw.parse().ok()?),
            ArgumentType::Float => ArgValue::Float(raw.parse().ok()?),
            ArgumentType::Bool => ArgValue::Bool(raw.parse().ok()?),
        })
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(name, type)` argument declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArgument {
    pub name: String,
    pub kind: ArgumentType,
}

impl NamedArgument {
    pub fn new(name: impl Into<String>, kind: ArgumentType) -> Self {
        Self { name: name.into(), kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Bool(bool),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Route '{destination}' expects {expected} argument(s), got {actual}")]
    Arity { destination: String, expected: usize, actual: usize },

    #[error("Argument '{name}' of route '{destination}' is not a valid {kind}: '{value}'")]
    InvalidArgument { destination: String, name: String, kind: ArgumentType, value: String },

    #[error("No screen registered for destination '{0}'")]
    UnknownDestination(String),
}

/// Where to navigate, and which arguments the destination takes.
///
/// [`NavigationCommand::Default`] is the "no navigation" sentinel. It reports an
/// empty destination and no arguments, but is distinct from a command that
/// targets a screen whose name happens to be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationCommand {
    #[default]
    Default,
    To { destination: String, arguments: Vec<NamedArgument> },
}

impl NavigationCommand {
    pub fn new(destination: impl Into<String>, arguments: Vec<NamedArgument>) -> Self {
        Self::To { destination: destination.into(), arguments }
    }

    pub fn destination(&self) -> &str {
        match self {
            Self::Default => "",
            Self::To { destination, .. } => destination,
        }
    }

    pub fn arguments(&self) -> &[NamedArgument] {
        match self {
            Self::Default => &[],
            Self::To { arguments, .. } => arguments,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Route pattern with placeholders, e.g. `forecast/{city}`.
    pub fn route(&self) -> String {
        std::iter::once(self.destination().to_string())
            .chain(self.arguments().iter().map(|arg| format!("{{{}}}", arg.name)))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Bind positional `values` to the declared arguments.
    ///
    /// Returns `Ok(None)` for the default command.
    pub fn resolve(&self, values: &[&str]) -> Result<Option<Route>, NavigationError> {
        let Self::To { destination, arguments } = self else {
            return Ok(None);
        };

        if arguments.len() != values.len() {
            return Err(NavigationError::Arity {
                destination: destination.clone(),
                expected: arguments.len(),
                actual: values.len(),
            });
        }

        let args = arguments
            .iter()
            .zip(values)
            .map(|(arg, raw)| {
                arg.kind.parse(raw).map(|value| (arg.name.clone(), value)).ok_or_else(|| {
                    NavigationError::InvalidArgument {
                        destination: destination.clone(),
                        name: arg.name.clone(),
                        kind: arg.kind,
                        value: raw.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let path = std::iter::once(destination.as_str())
            .chain(values.iter().copied())
            .collect::<Vec<_>>()
            .join("/");

        Ok(Some(Route { destination: destination.clone(), path, args }))
    }
}

/// A command with its arguments bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub destination: String,
    pub path: String,
    pub args: Vec<(String, ArgValue)>,
}

impl Route {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Maps resolved routes to screens. Implemented by the front end.
pub trait Router {
    type Screen;

    fn screen_for(&self, route: &Route) -> Result<Self::Screen, NavigationError>;

    /// Resolve `command` and map it to a screen. `Ok(None)` means stay put.
    fn navigate(
        &self,
        command: &NavigationCommand,
        values: &[&str],
    ) -> Result<Option<Self::Screen>, NavigationError> {
        match command.resolve(values)? {
            Some(route) => self.screen_for(&route).map(Some),
            None => Ok(None),
        }
    }
}

/// Commands for the app's screens.
#[derive(Debug, Clone, Copy)]
pub struct ForecastDirections;

impl ForecastDirections {
    pub const CITIES: &'static str = "cities";
    pub const FORECAST: &'static str = "forecast";
    pub const CITY_ARG: &'static str = "city";

    pub fn cities() -> NavigationCommand {
        NavigationCommand::new(Self::CITIES, Vec::new())
    }

    pub fn forecast() -> NavigationCommand {
        NavigationCommand::new(
            Self::FORECAST,
            vec![NamedArgument::new(Self::CITY_ARG, ArgumentType::String)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Screen {
        Cities,
        Forecast(String),
    }

    struct TestRouter;

    impl Router for TestRouter {
        type Screen = Screen;

        fn screen_for(&self, route: &Route) -> Result<Screen, NavigationError> {
            match route.destination.as_str() {
                ForecastDirections::CITIES => Ok(Screen::Cities),
                ForecastDirections::FORECAST => {
                    let city = route
                        .get(ForecastDirections::CITY_ARG)
                        .and_then(ArgValue::as_str)
                        .unwrap_or_default();
                    Ok(Screen::Forecast(city.to_string()))
                }
                other => Err(NavigationError::UnknownDestination(other.to_string())),
            }
        }
    }

    #[test]
    fn default_is_empty_sentinel() {
        let cmd = NavigationCommand::default();
        assert_eq!(cmd, NavigationCommand::Default);
        assert_eq!(cmd.destination(), "");
        assert!(cmd.arguments().is_empty());
        assert!(cmd.is_default());
    }

    #[test]
    fn default_differs_from_empty_named_destination() {
        let empty = NavigationCommand::new("", Vec::new());
        assert_ne!(empty, NavigationCommand::Default);
        assert!(!empty.is_default());
        assert!(empty.resolve(&[]).expect("no args").is_some());
    }

    #[test]
    fn route_pattern_lists_placeholders() {
        assert_eq!(ForecastDirections::forecast().route(), "forecast/{city}");
        assert_eq!(ForecastDirections::cities().route(), "cities");
    }

    #[test]
    fn resolve_binds_typed_values() {
        let cmd = NavigationCommand::new(
            "day",
            vec![
                NamedArgument::new("city", ArgumentType::String),
                NamedArgument::new("offset", ArgumentType::Int),
                NamedArgument::new("hourly", ArgumentType::Bool),
            ],
        );
        let route = cmd.resolve(&["Rome", "2", "true"]).expect("valid").expect("not default");
        assert_eq!(route.path, "day/Rome/2/true");
        assert_eq!(route.get("offset"), Some(&ArgValue::Int(2)));
        assert_eq!(route.get("hourly"), Some(&ArgValue::Bool(true)));
    }

    #[test]
    fn resolve_rejects_bad_arity_and_types() {
        let err = ForecastDirections::forecast().resolve(&[]).unwrap_err();
        assert!(matches!(err, NavigationError::Arity { expected: 1, actual: 0, .. }));

        let cmd = NavigationCommand::new("n", vec![NamedArgument::new("x", ArgumentType::Long)]);
        let err = cmd.resolve(&["ten"]).unwrap_err();
        assert!(err.to_string().contains("not a valid long"));
    }

    #[test]
    fn router_maps_commands_to_screens() {
        let router = TestRouter;
        assert_eq!(router.navigate(&NavigationCommand::Default, &[]), Ok(None));
        assert_eq!(
            router.navigate(&ForecastDirections::cities(), &[]),
            Ok(Some(Screen::Cities))
        );
        assert_eq!(
            router.navigate(&ForecastDirections::forecast(), &["Paris"]),
            Ok(Some(Screen::Forecast("Paris".into())))
        );
        assert!(router.navigate(&NavigationCommand::new("nowhere", vec![]), &[]).is_err());
    }
}
