//! Current weather for the fixed city list
//!
//! Every city is fetched in its own task with its own timeout. A city whose
//! fetch fails in any way is answered with sample data instead, so a batch
//! always yields exactly one reading per city.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use crate::config::WeatherConfig;
use crate::models::{City, WeatherReading};
use crate::{CitycastError, Result};

pub mod azure_maps;
pub mod mock;

pub use azure_maps::AzureMapsClient;

/// Source of current conditions for a single city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, city: &City) -> Result<WeatherReading>;
}

/// Fans weather requests out over a set of cities
#[derive(Clone)]
pub struct WeatherService {
    /// `None` when no credential is configured: every reading is sample data
    provider: Option<Arc<dyn WeatherProvider>>,
    timeout: Duration,
}

impl WeatherService {
    #[must_use]
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Build the service from configuration. No credential means mock mode.
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        let provider: Option<Arc<dyn WeatherProvider>> = match config.credential() {
            Some(key) => Some(Arc::new(AzureMapsClient::new(config, key)?)),
            None => None,
        };
        Ok(Self::new(provider, config.timeout()))
    }

    #[must_use]
    pub fn is_mock_mode(&self) -> bool {
        self.provider.is_none()
    }

    /// One reading per city, in input order.
    ///
    /// Per-city failures never surface here. An error means the batch itself
    /// broke (a fetch task died) and the caller should fall back wholesale.
    pub async fn fetch_all(&self, cities: &[City]) -> Result<Vec<WeatherReading>> {
        let Some(provider) = &self.provider else {
            info!("No weather provider credential configured, using sample data");
            return Ok(cities.iter().map(mock::sample_reading).collect());
        };

        let tasks = cities.iter().copied().map(|city| {
            let provider = Arc::clone(provider);
            let timeout = self.timeout;
            tokio::spawn(async move { fetch_city(provider.as_ref(), &city, timeout).await })
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| {
                joined.map_err(|e| CitycastError::general(format!("Weather task failed: {e}")))
            })
            .collect()
    }
}

/// Sample data for every city, used when a whole batch fails
#[must_use]
pub fn fallback_all(cities: &[City]) -> Vec<WeatherReading> {
    cities
        .iter()
        .map(|city| mock::fallback_reading(city, None))
        .collect()
}

async fn fetch_city(provider: &dyn WeatherProvider, city: &City, timeout: Duration) -> WeatherReading {
    let outcome = match tokio::time::timeout(timeout, provider.current_conditions(city)).await {
        Ok(result) => result,
        Err(_) => Err(CitycastError::Timeout {
            seconds: timeout.as_secs_f64(),
        }),
    };

    match outcome {
        Ok(reading) => reading,
        Err(e) => {
            warn!(city = city.name, error = %e, "Weather fetch failed, using sample data");
            mock::fallback_reading(city, Some(e.advisory()))
        }
    }
}
