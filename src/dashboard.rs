//! Weather for every city, enriched with today's holidays

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::holidays::{self, CityHolidayStatus};
use crate::models::{City, EnrichedReading, WeatherReading};
use crate::weather::{self, WeatherService};

/// Fetch weather for `cities` and attach the holiday each city observes on `date`.
///
/// Always returns one entry per city, in the order given.
pub async fn city_weather(
    service: &WeatherService,
    cities: &[City],
    date: NaiveDate,
) -> Vec<EnrichedReading> {
    let readings = match service.fetch_all(cities).await {
        Ok(readings) => readings,
        Err(e) => {
            error!("Weather aggregation failed, serving sample data: {e}");
            weather::fallback_all(cities)
        }
    };

    let statuses = holidays::holidays_on(&City::names(cities), date);
    debug!(
        "{} of {} cities observe a holiday on {}",
        statuses.iter().filter(|s| s.is_holiday).count(),
        statuses.len(),
        holidays::format_date(&date)
    );

    enrich(readings, &statuses)
}

/// Left-join readings with holiday statuses on exact city name
#[must_use]
pub fn enrich(readings: Vec<WeatherReading>, statuses: &[CityHolidayStatus]) -> Vec<EnrichedReading> {
    readings
        .into_iter()
        .map(|reading| {
            let holiday_name = statuses
                .iter()
                .find(|s| s.city == reading.city)
                .and_then(|s| s.holiday_name)
                .map(str::to_string);
            EnrichedReading {
                reading,
                holiday_name,
            }
        })
        .collect()
}
