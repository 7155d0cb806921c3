//! Azure Maps "current conditions" client
//!
//! Normalizes the provider payload into a [`WeatherReading`]: temperatures and
//! pressure are rounded, the phrase is lowercased, wind is converted from
//! km/h to m/s and the icon code is mapped onto OpenWeatherMap-style icons.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{City, WeatherReading};
use crate::{CitycastError, Result};

const API_VERSION: &str = "1.1";
const CURRENT_CONDITIONS_PATH: &str = "/weather/currentConditions/json";
const KMH_TO_MS: f64 = 0.277778;

/// Whether the provider reports daylight at the city
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    #[must_use]
    pub fn from_is_day_time(is_day_time: bool) -> Self {
        if is_day_time { Self::Day } else { Self::Night }
    }

    fn suffix(self) -> char {
        match self {
            Self::Day => 'd',
            Self::Night => 'n',
        }
    }
}

/// OpenWeatherMap icon family for an Azure Maps icon code
fn icon_family(code: u32) -> &'static str {
    match code {
        1 | 30 | 31 => "01", // sunny, hot, cold
        2 | 3 => "02",
        4 | 5 => "03",
        6..=8 => "04",
        11 | 32 => "50", // fog, windy
        12..=14 => "10",
        15..=17 => "11",
        18 => "09",
        19..=26 | 29 => "13",
        _ => "02",
    }
}

/// Icon code such as `"04n"` for an Azure Maps icon code and day phase
#[must_use]
pub fn map_icon(code: u32, phase: DayPhase) -> String {
    format!("{}{}", icon_family(code), phase.suffix())
}

/// Azure Maps weather client
pub struct AzureMapsClient {
    client: Client,
    base_url: String,
    subscription_key: String,
}

impl AzureMapsClient {
    /// Create a new client with the configured base URL and timeout
    pub fn new(config: &WeatherConfig, subscription_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("citycast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            subscription_key: subscription_key.into(),
        })
    }
}

#[async_trait]
impl WeatherProvider for AzureMapsClient {
    #[instrument(skip(self, city), fields(city = city.name))]
    async fn current_conditions(&self, city: &City) -> Result<WeatherReading> {
        let start_time = Instant::now();
        let url = format!("{}{}", self.base_url, CURRENT_CONDITIONS_PATH);
        let query = city.query();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api-version", API_VERSION),
                ("query", query.as_str()),
                ("subscription-key", self.subscription_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            "Azure Maps responded {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    error: ErrorDetail {
                        message: Some(message),
                    },
                }) => CitycastError::api(status.as_u16(), message),
                _ => CitycastError::Status {
                    status: status.as_u16(),
                },
            });
        }

        let payload: CurrentConditionsResponse = serde_json::from_str(&body)
            .map_err(|e| CitycastError::invalid_response(e.to_string()))?;

        let conditions = payload.results.into_iter().next().ok_or_else(|| {
            CitycastError::invalid_response("current conditions response had no results")
        })?;

        if start_time.elapsed() > Duration::from_secs(5) {
            warn!(
                "Slow weather response for {}: {:.3}s",
                city.name,
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(conditions.normalize(city))
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditionsResponse {
    results: Vec<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentConditions {
    phrase: String,
    icon_code: u32,
    #[serde(default = "default_is_day_time")]
    is_day_time: bool,
    temperature: Measurement,
    real_feel_temperature: Measurement,
    relative_humidity: f64,
    wind: Wind,
    pressure: Measurement,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    /// km/h
    speed: Measurement,
}

fn default_is_day_time() -> bool {
    true
}

impl CurrentConditions {
    fn normalize(self, city: &City) -> WeatherReading {
        WeatherReading {
            city: city.name.to_string(),
            temperature: self.temperature.value.round() as i32,
            feels_like: self.real_feel_temperature.value.round() as i32,
            humidity: self.relative_humidity.round() as i32,
            description: self.phrase.to_lowercase(),
            icon_code: map_icon(self.icon_code, DayPhase::from_is_day_time(self.is_day_time)),
            wind_speed: WeatherReading::round_wind_speed(self.wind.speed.value * KMH_TO_MS),
            pressure: self.pressure.value.round() as i32,
            is_mock_data: false,
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MUMBAI: City = City::new("Mumbai", 19.0760, 72.8777, "Asia/Kolkata");

    fn conditions_body() -> serde_json::Value {
        json!({
            "results": [{
                "dateTime": "2026-10-17T14:05:00+05:30",
                "phrase": "Mostly Cloudy",
                "iconCode": 6,
                "hasPrecipitation": false,
                "isDayTime": true,
                "temperature": {"value": 31.6, "unit": "C", "unitType": 17},
                "realFeelTemperature": {"value": 36.4, "unit": "C", "unitType": 17},
                "relativeHumidity": 74,
                "wind": {
                    "direction": {"degrees": 270.0, "localizedDescription": "W"},
                    "speed": {"value": 11.1, "unit": "km/h", "unitType": 7}
                },
                "pressure": {"value": 1008.4, "unit": "mb", "unitType": 14}
            }]
        })
    }

    fn client_for(server: &MockServer) -> AzureMapsClient {
        let config = WeatherConfig {
            base_url: server.uri(),
            ..WeatherConfig::default()
        };
        AzureMapsClient::new(&config, "test-key").unwrap()
    }

    #[rstest]
    #[case(1, DayPhase::Day, "01d")]
    #[case(1, DayPhase::Night, "01n")]
    #[case(3, DayPhase::Day, "02d")]
    #[case(7, DayPhase::Night, "04n")]
    #[case(11, DayPhase::Day, "50d")]
    #[case(18, DayPhase::Day, "09d")]
    #[case(26, DayPhase::Night, "13n")]
    #[case(32, DayPhase::Day, "50d")]
    #[case(99, DayPhase::Day, "02d")]
    #[case(0, DayPhase::Night, "02n")]
    fn test_map_icon(#[case] code: u32, #[case] phase: DayPhase, #[case] expected: &str) {
        assert_eq!(map_icon(code, phase), expected);
    }

    #[tokio::test]
    async fn test_normalizes_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CURRENT_CONDITIONS_PATH))
            .and(query_param("api-version", "1.1"))
            .and(query_param("query", "19.076,72.8777"))
            .and(query_param("subscription-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(conditions_body()))
            .expect(1)
            .mount(&server)
            .await;

        let reading = client_for(&server).current_conditions(&MUMBAI).await.unwrap();

        assert_eq!(reading.city, "Mumbai");
        assert_eq!(reading.temperature, 32);
        assert_eq!(reading.feels_like, 36);
        assert_eq!(reading.humidity, 74);
        assert_eq!(reading.description, "mostly cloudy");
        assert_eq!(reading.icon_code, "04d");
        assert_eq!(reading.wind_speed, 3.1);
        assert_eq!(reading.pressure, 1008);
        assert!(!reading.is_mock_data);
        assert!(reading.error_message.is_none());
    }

    #[tokio::test]
    async fn test_provider_error_message_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CURRENT_CONDITIONS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": "401 Unauthorized", "message": "Invalid subscription key"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .current_conditions(&MUMBAI)
            .await
            .unwrap_err();

        assert!(matches!(err, CitycastError::Api { status: 401, .. }));
        assert_eq!(err.advisory(), "Invalid subscription key");
    }

    #[tokio::test]
    async fn test_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .current_conditions(&MUMBAI)
            .await
            .unwrap_err();

        assert!(matches!(err, CitycastError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn test_empty_results_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .current_conditions(&MUMBAI)
            .await
            .unwrap_err();

        assert!(matches!(err, CitycastError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .current_conditions(&MUMBAI)
            .await
            .unwrap_err();

        assert!(matches!(err, CitycastError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_night_icon_and_missing_day_flag() {
        let server = MockServer::start().await;
        let mut night = conditions_body();
        night["results"][0]["isDayTime"] = json!(false);
        night["results"][0]["iconCode"] = json!(15);
        Mock::given(method("GET"))
            .and(query_param("query", "19.076,72.8777"))
            .respond_with(ResponseTemplate::new(200).set_body_json(night))
            .mount(&server)
            .await;

        let reading = client_for(&server).current_conditions(&MUMBAI).await.unwrap();
        assert_eq!(reading.icon_code, "11n");

        let server = MockServer::start().await;
        let mut no_flag = conditions_body();
        no_flag["results"][0]
            .as_object_mut()
            .unwrap()
            .remove("isDayTime");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(no_flag))
            .mount(&server)
            .await;

        let reading = client_for(&server).current_conditions(&MUMBAI).await.unwrap();
        assert_eq!(reading.icon_code, "04d");
    }
}
