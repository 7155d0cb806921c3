//! Weather reading model and its holiday-enriched form

use serde::{Deserialize, Serialize};

/// Current conditions for one city, normalized from the provider or mocked
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    /// Temperature in Celsius
    pub temperature: i32,
    /// Apparent temperature in Celsius
    pub feels_like: i32,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Lowercase human-readable conditions, e.g. "partly cloudy"
    pub description: String,
    /// OpenWeatherMap-style icon code, e.g. "02d"
    #[serde(rename = "icon", alias = "iconCode")]
    pub icon_code: String,
    /// Wind speed in m/s, one decimal place
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: i32,
    pub is_mock_data: bool,
    /// Why this reading is sample data, when an upstream call failed
    #[serde(
        rename = "error",
        alias = "errorMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,
}

/// A weather reading joined with the city's holiday for today, if any
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedReading {
    #[serde(flatten)]
    pub reading: WeatherReading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl WeatherReading {
    /// Round a speed to one decimal place
    #[must_use]
    pub fn round_wind_speed(speed: f64) -> f64 {
        (speed * 10.0).round() / 10.0
    }
}
