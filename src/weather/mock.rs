//! Sample weather used when the provider is unconfigured or unreachable

use rand::RngExt;

use crate::models::{City, WeatherReading};

const SAMPLE_SKIES: [(&str, &str); 4] = [
    ("clear sky", "01d"),
    ("few clouds", "02d"),
    ("scattered clouds", "03d"),
    ("partly cloudy", "04d"),
];

const FALLBACK_SKY: (&str, &str) = ("partly cloudy", "02d");

/// Randomized reading with a randomized sky, used when no credential is set
#[must_use]
pub fn sample_reading(city: &City) -> WeatherReading {
    let mut rng = rand::rng();
    let (description, _) = SAMPLE_SKIES[rng.random_range(0..SAMPLE_SKIES.len())];
    let (_, icon) = SAMPLE_SKIES[rng.random_range(0..SAMPLE_SKIES.len())];
    reading(city, description, icon, None)
}

/// Randomized reading standing in for a failed upstream call
#[must_use]
pub fn fallback_reading(city: &City, error_message: Option<String>) -> WeatherReading {
    reading(city, FALLBACK_SKY.0, FALLBACK_SKY.1, error_message)
}

fn reading(
    city: &City,
    description: &str,
    icon: &str,
    error_message: Option<String>,
) -> WeatherReading {
    let mut rng = rand::rng();
    WeatherReading {
        city: city.name.to_string(),
        temperature: rng.random_range(25.0..35.0_f64).round() as i32,
        feels_like: rng.random_range(26.0..36.0_f64).round() as i32,
        humidity: rng.random_range(60.0..90.0_f64).round() as i32,
        description: description.to_string(),
        icon_code: icon.to_string(),
        wind_speed: WeatherReading::round_wind_speed(rng.random_range(0.0..5.0)),
        pressure: rng.random_range(1010.0..1030.0_f64).round() as i32,
        is_mock_data: true,
        error_message,
    }
}

/// Check a reading against the sample ranges. Shared with the integration tests.
#[must_use]
pub fn within_sample_ranges(reading: &WeatherReading) -> bool {
    (25..=35).contains(&reading.temperature)
        && (26..=36).contains(&reading.feels_like)
        && (60..=90).contains(&reading.humidity)
        && (0.0..=5.0).contains(&reading.wind_speed)
        && (1010..=1030).contains(&reading.pressure)
}
