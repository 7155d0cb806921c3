//! `citycast` - clocks, current weather and public holidays for a fixed set of cities
//!
//! The library holds the holiday calendar, the weather aggregation pipeline
//! with its sample-data fallback, and the axum application that serves them.

pub mod api;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod holidays;
pub mod models;
pub mod rate_limit;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::CitycastConfig;
pub use error::CitycastError;
pub use models::{CITIES, City, EnrichedReading, WeatherReading};
pub use weather::{WeatherProvider, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CitycastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
