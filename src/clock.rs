//! Local date and time for each city

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::models::City;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CityClock {
    pub city: String,
    pub timezone: String,
    /// e.g. "Saturday, October 17, 2026"
    pub date: String,
    /// e.g. "03:04:05 PM"
    pub time: String,
    /// e.g. "+05:30"
    pub utc_offset: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClockSnapshot {
    pub server_time: String,
    pub server_utc_offset: String,
    pub cities: Vec<CityClock>,
}

/// The time at `instant` in one timezone
fn clock_in<Z: TimeZone>(instant: &DateTime<Utc>, zone: &Z) -> (String, String, String)
where
    Z::Offset: std::fmt::Display,
{
    let local = instant.with_timezone(zone);
    (
        local.format("%A, %B %-d, %Y").to_string(),
        local.format("%I:%M:%S %p").to_string(),
        local.format("%:z").to_string(),
    )
}

/// Clocks for `cities` at `instant`. Cities with an unknown timezone are skipped.
#[must_use]
pub fn city_clocks(cities: &[City], instant: DateTime<Utc>) -> Vec<CityClock> {
    cities
        .iter()
        .filter_map(|city| match city.timezone.parse::<Tz>() {
            Ok(tz) => {
                let (date, time, utc_offset) = clock_in(&instant, &tz);
                Some(CityClock {
                    city: city.name.to_string(),
                    timezone: city.timezone.to_string(),
                    date,
                    time,
                    utc_offset,
                })
            }
            Err(e) => {
                warn!("Skipping clock for {}: {}", city.name, e);
                None
            }
        })
        .collect()
}

/// Server time plus every city's clock, right now
#[must_use]
pub fn snapshot(cities: &[City]) -> ClockSnapshot {
    let now = Utc::now();
    let server = now.with_timezone(&Local);
    ClockSnapshot {
        server_time: server.to_rfc3339(),
        server_utc_offset: server.format("%:z").to_string(),
        cities: city_clocks(cities, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CITIES;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 4, 5).unwrap()
    }

    #[test]
    fn test_city_clocks() {
        let clocks = city_clocks(&CITIES, instant());
        assert_eq!(clocks.len(), 5);

        let mumbai = &clocks[2];
        assert_eq!(mumbai.city, "Mumbai");
        assert_eq!(mumbai.date, "Saturday, October 17, 2026");
        assert_eq!(mumbai.time, "02:34:05 PM");
        assert_eq!(mumbai.utc_offset, "+05:30");

        // daylight saving is in effect in October
        let sydney = &clocks[3];
        assert_eq!(sydney.time, "08:04:05 PM");
        assert_eq!(sydney.utc_offset, "+11:00");
    }

    #[test]
    fn test_date_rolls_over_per_zone() {
        let late = Utc.with_ymd_and_hms(2026, 12, 31, 20, 0, 0).unwrap();
        let clocks = city_clocks(&CITIES, late);
        assert_eq!(clocks[0].date, "Friday, January 1, 2027");
        assert_eq!(clocks[1].date, "Friday, January 1, 2027");
        assert_eq!(clocks[4].date, "Friday, January 1, 2027");
    }

    #[test]
    fn test_unknown_timezone_is_skipped() {
        let cities = [CITIES[0], City::new("Atlantis", 0.0, 0.0, "Ocean/Atlantis")];
        let clocks = city_clocks(&cities, instant());
        assert_eq!(clocks.len(), 1);
        assert_eq!(clocks[0].city, "Singapore");
    }

    #[test]
    fn test_snapshot_covers_all_cities() {
        let snapshot = snapshot(&CITIES);
        assert_eq!(snapshot.cities.len(), 5);
        assert!(!snapshot.server_utc_offset.is_empty());
    }
}
