//! Public holiday lookup
//!
//! Holidays are matched by exact `YYYY-MM-DD` string equality against the
//! built-in table. There is no recurrence logic and no timezone handling:
//! the date passed in is taken at face value.

pub mod table;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

pub use table::{Country, HolidayEntry};

/// Holiday status of one city on one day
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CityHolidayStatus {
    pub city: String,
    pub is_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<&'static str>,
}

/// Zero-padded `YYYY-MM-DD` from the date's own calendar fields
#[must_use]
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// The holiday on `date` in `city`, if any.
///
/// Cities without a known country simply have no holidays.
#[must_use]
pub fn holiday_on(city: &str, date: NaiveDate) -> Option<&'static HolidayEntry> {
    let country = Country::for_city(city)?;
    let date = format_date(&date);
    country.holidays().iter().find(|h| h.date == date)
}

/// Holiday status for each city on `date`, in input order
#[must_use]
pub fn holidays_on<S: AsRef<str>>(cities: &[S], date: NaiveDate) -> Vec<CityHolidayStatus> {
    cities
        .iter()
        .map(|city| {
            let city = city.as_ref();
            let holiday = holiday_on(city, date);
            CityHolidayStatus {
                city: city.to_string(),
                is_holiday: holiday.is_some(),
                holiday_name: holiday.map(|h| h.name),
            }
        })
        .collect()
}

/// Holiday status for each city on the server's local date
#[must_use]
pub fn holidays_today<S: AsRef<str>>(cities: &[S]) -> Vec<CityHolidayStatus> {
    holidays_on(cities, today())
}

/// All holidays a city observes in `year`, in table order
#[must_use]
pub fn holidays_in_year(city: &str, year: i32) -> Vec<HolidayEntry> {
    let Some(country) = Country::for_city(city) else {
        return Vec::new();
    };
    let prefix = format!("{year:04}-");
    country
        .holidays()
        .iter()
        .filter(|h| h.date.starts_with(&prefix))
        .copied()
        .collect()
}

/// Server-local calendar date
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
