use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    clock::{self, ClockSnapshot},
    dashboard,
    holidays::{self, HolidayEntry},
    models::{City, EnrichedReading},
    weather::WeatherService,
};

const NO_HOLIDAY_MESSAGE: &str = "No public holiday today";

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub weather: WeatherService,
    pub cities: &'static [City],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHoliday {
    pub city: String,
    pub holiday_name: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayHolidays {
    pub date: String,
    pub has_holiday: bool,
    pub holidays: Vec<ApiHoliday>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CityHoliday {
    #[serde(rename_all = "camelCase")]
    Holiday {
        city: String,
        is_holiday: bool,
        holiday_name: &'static str,
        date: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    NoHoliday {
        city: String,
        is_holiday: bool,
        message: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct YearHolidays {
    pub city: String,
    pub year: i32,
    pub holidays: Vec<HolidayEntry>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/holidays/today", get(get_holidays_today))
        .route("/holidays/city/{city_name}", get(get_city_holiday))
        .route("/holidays/city/{city_name}/{year}", get(get_city_year_holidays))
        .route("/time", get(get_time))
        .with_state(state)
}

async fn get_weather(State(state): State<AppState>) -> Json<Vec<EnrichedReading>> {
    let readings = dashboard::city_weather(&state.weather, state.cities, holidays::today()).await;
    Json(readings)
}

async fn get_holidays_today(State(state): State<AppState>) -> Json<TodayHolidays> {
    let today = holidays::today();
    let holidays: Vec<ApiHoliday> = City::names(state.cities)
        .into_iter()
        .filter_map(|city| {
            holidays::holiday_on(city, today).map(|h| ApiHoliday {
                city: city.to_string(),
                holiday_name: h.name,
                date: h.date,
            })
        })
        .collect();

    Json(TodayHolidays {
        date: holidays::format_date(&Utc::now().date_naive()),
        has_holiday: !holidays.is_empty(),
        holidays,
    })
}

async fn get_city_holiday(Path(city_name): Path<String>) -> Json<CityHoliday> {
    let response = match holidays::holiday_on(&city_name, holidays::today()) {
        Some(h) => CityHoliday::Holiday {
            city: city_name,
            is_holiday: true,
            holiday_name: h.name,
            date: h.date,
        },
        None => CityHoliday::NoHoliday {
            city: city_name,
            is_holiday: false,
            message: NO_HOLIDAY_MESSAGE,
        },
    };
    Json(response)
}

async fn get_city_year_holidays(
    Path((city_name, year)): Path<(String, String)>,
) -> Result<Json<YearHolidays>, StatusCode> {
    let year: i32 = year.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    let holidays = holidays::holidays_in_year(&city_name, year);
    Ok(Json(YearHolidays {
        city: city_name,
        year,
        holidays,
    }))
}

async fn get_time(State(state): State<AppState>) -> Json<ClockSnapshot> {
    Json(clock::snapshot(state.cities))
}
