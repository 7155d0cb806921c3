//! City model for the fixed set of reported cities

use serde::Serialize;

/// A city we report weather, time and holidays for
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct City {
    /// Display name, also the join key for holiday enrichment
    pub name: &'static str,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone id
    pub timezone: &'static str,
}

/// The cities served by `/api/weather`, in response order.
pub const CITIES: [City; 5] = [
    City::new("Singapore", 1.3521, 103.8198, "Asia/Singapore"),
    City::new("Bangalore", 12.9716, 77.5946, "Asia/Kolkata"),
    City::new("Mumbai", 19.0760, 72.8777, "Asia/Kolkata"),
    City::new("Sydney", -33.8688, 151.2093, "Australia/Sydney"),
    City::new("Bangkok", 13.7563, 100.5018, "Asia/Bangkok"),
];

impl City {
    #[must_use]
    pub const fn new(
        name: &'static str,
        latitude: f64,
        longitude: f64,
        timezone: &'static str,
    ) -> Self {
        Self {
            name,
            latitude,
            longitude,
            timezone,
        }
    }

    /// Coordinates in the `lat,lon` form the weather provider expects
    #[must_use]
    pub fn query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Names of the given cities, in order
    #[must_use]
    pub fn names(cities: &[City]) -> Vec<&'static str> {
        cities.iter().map(|c| c.name).collect()
    }
}
