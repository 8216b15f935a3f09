use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::ForecastError, model::City};

/// Cities shipped with the app, in display order.
pub const CITIES: &[&str] = &[
    "London",
    "New York",
    "Paris",
    "Moscow",
    "Tokyo",
    "Dubai",
    "Singapore",
    "Barcelona",
    "Los Angeles",
    "San Francisco",
    "Madrid",
    "Rome",
    "Chicago",
    "Toronto",
    "Abu Dhabi",
    "St. Petersburg",
    "Amsterdam",
    "Berlin",
    "Prague",
    "Lisbon",
    "Washington",
    "Istanbul",
    "Las Vegas",
    "Seoul",
    "Sydney",
    "Miami",
    "Munich",
    "Milan",
    "San Diego",
    "Bangkok",
    "Vienna",
    "Dublin",
    "Vancouver",
    "Boston",
    "Zurich",
    "Budapest",
    "Houston",
    "Seattle",
    "Montreal",
    "Hong Kong",
    "Frankfurt",
    "São Paulo",
    "Copenhagen",
    "Atlanta",
    "Buenos Aires",
];

pub const DEFAULT_CITY: &str = "San Francisco";

/// Source of selectable cities.
#[async_trait]
pub trait CityRepository: Send + Sync + Debug {
    /// Cities whose name contains `query`, ignoring case, in catalog order.
    /// An empty query returns the whole catalog.
    async fn get_cities(&self, query: &str) -> Result<Vec<City>, ForecastError>;

    async fn get_default_city(&self) -> Result<City, ForecastError>;
}

/// Filter `cities` by a case-insensitive substring match, keeping order.
pub fn filter_cities<S: AsRef<str>>(cities: &[S], query: &str) -> Vec<City> {
    let needle = query.to_lowercase();
    cities
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(str::to_owned)
        .collect()
}

/// The built-in read-only catalog backed by [`CITIES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCityCatalog;

impl StaticCityCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CityRepository for StaticCityCatalog {
    async fn get_cities(&self, query: &str) -> Result<Vec<City>, ForecastError> {
        let cities = filter_cities(CITIES, query);
        tracing::debug!(query, matches = cities.len(), "catalog lookup");
        Ok(cities)
    }

    async fn get_default_city(&self) -> Result<City, ForecastError> {
        Ok(DEFAULT_CITY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_query_returns_full_catalog_in_declared_order() {
        let cities = StaticCityCatalog::new().get_cities("").await.expect("static catalog");
        assert_eq!(cities.len(), CITIES.len());
        assert_eq!(cities.first().map(String::as_str), Some("London"));
        assert_eq!(cities.last().map(String::as_str), Some("Buenos Aires"));
        assert!(cities.iter().zip(CITIES).all(|(a, b)| a == b));
    }

    #[tokio::test]
    async fn query_matches_case_insensitive_substrings() {
        let catalog = StaticCityCatalog::new();
        for query in ["san", "SAN", "o", "Ber", "new york", "ão"] {
            let cities = catalog.get_cities(query).await.expect("static catalog");
            assert!(!cities.is_empty(), "query {query:?} should match something");
            for city in &cities {
                assert!(city.to_lowercase().contains(&query.to_lowercase()));
            }
        }
    }

    #[tokio::test]
    async fn matches_preserve_catalog_order() {
        let cities = StaticCityCatalog::new().get_cities("san").await.expect("static catalog");
        assert_eq!(cities, vec!["San Francisco", "San Diego"]);
    }

    #[tokio::test]
    async fn unmatched_query_is_empty_not_an_error() {
        let cities = StaticCityCatalog::new()
            .get_cities("zzz-no-match")
            .await
            .expect("static catalog");
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn default_city_is_in_catalog() {
        let catalog = StaticCityCatalog::new();
        let default = catalog.get_default_city().await.expect("static catalog");
        let all = catalog.get_cities("").await.expect("static catalog");
        assert!(all.contains(&default));
    }

    #[test]
    fn accented_query_matches_uppercase_name() {
        assert_eq!(filter_cities(CITIES, "SÃO"), vec!["São Paulo"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_match_contains_query(query in "\\PC{1,8}") {
                let needle = query.to_lowercase();
                for city in filter_cities(CITIES, &query) {
                    prop_assert!(city.to_lowercase().contains(&needle), "{city} vs {query}");
                }
            }

            #[test]
            fn any_slice_of_a_city_finds_it(
                index in 0..CITIES.len(),
                start in 0usize..8,
                len in 1usize..6,
                upper in any::<bool>()
            ) {
                let city = CITIES[index];
                let chars: Vec<char> = city.chars().collect();
                let start = start.min(chars.len() - 1);
                let end = (start + len).min(chars.len());
                let slice: String = chars[start..end].iter().collect();
                let query = if upper { slice.to_uppercase() } else { slice.to_lowercase() };

                let matches = filter_cities(CITIES, &query);
                prop_assert!(matches.iter().any(|m| m == city), "{query} should find {city}");

                let positions: Vec<usize> = matches
                    .iter()
                    .map(|m| CITIES.iter().position(|c| *c == m.as_str()).expect("from catalog"))
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}

