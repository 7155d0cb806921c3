use anyhow::{Context, Result};
use citycast::config::LoggingConfig;
use citycast::{AppState, CITIES, CitycastConfig, WeatherService, web};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("citycast={},tower_http=info", logging.level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CitycastConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let weather = WeatherService::from_config(&config.weather)
        .context("Failed to create weather client")?;
    if weather.is_mock_mode() {
        tracing::warn!("No Azure Maps subscription key found. Serving sample weather data.");
    }

    let state = AppState {
        weather,
        cities: &CITIES,
    };

    tracing::info!(
        "citycast {} serving {} cities from '{}'",
        citycast::VERSION,
        CITIES.len(),
        config.server.static_dir
    );
    web::run(&config, state).await.context("Web server failed")?;
    Ok(())
}
