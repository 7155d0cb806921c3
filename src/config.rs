//! Configuration management for citycast
//!
//! Settings are layered: built-in defaults, an optional TOML file, then
//! `CITYCAST__*` environment variables. The legacy `AZURE_MAPS_SUBSCRIPTION_KEY`
//! and `PORT` variables are applied last.
//!
//! The file is `citycast.toml` unless `--config <path>` is passed on the
//! command line or `CITYCAST_CONFIG` is set. The flag wins over the variable.

use crate::CitycastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var naming a config file to load instead of `citycast.toml`
pub const CONFIG_PATH_ENV: &str = "CITYCAST_CONFIG";

/// Command-line flag naming a config file, as `--config <path>` or `--config=<path>`
pub const CONFIG_FLAG: &str = "--config";

const SUBSCRIPTION_KEY_ENV: &str = "AZURE_MAPS_SUBSCRIPTION_KEY";
const PORT_ENV: &str = "PORT";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitycastConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `index.html` and the client assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Azure Maps subscription key. Without one every reading is mock data.
    pub api_key: Option<String>,
    /// Base URL for the weather provider
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Per-city request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Request limits per client address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Length of one counting window in seconds
    #[serde(default = "default_rate_limit_window")]
    pub window_seconds: u64,
    /// Requests allowed per window under `/api`
    #[serde(default = "default_api_max_requests")]
    pub api_max_requests: u32,
    /// Requests allowed per window for the index page
    #[serde(default = "default_page_max_requests")]
    pub page_max_requests: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_weather_base_url() -> String {
    "https://atlas.microsoft.com".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_rate_limit_window() -> u64 {
    15 * 60
}

fn default_api_max_requests() -> u32 {
    100
}

fn default_page_max_requests() -> u32 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_rate_limit_window(),
            api_max_requests: default_api_max_requests(),
            page_max_requests: default_page_max_requests(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    /// The subscription key, if one is set and non-empty
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

impl CitycastConfig {
    /// Load configuration using the process arguments and environment
    pub fn load() -> Result<Self> {
        let path = match config_path_from_args(std::env::args().skip(1))? {
            Some(path) => Some(path),
            None => std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
        };
        Self::load_from_path(path.as_deref())
    }

    /// Load configuration from the given file (if it exists) and the environment
    pub fn load_from_path(config_path: Option<&Path>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| Path::new("citycast.toml"));

        let mut builder = Config::builder();
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder
            .add_source(
                Environment::with_prefix("CITYCAST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("weather.api_key", std::env::var(SUBSCRIPTION_KEY_ENV).ok())
            .with_context(|| format!("Failed to apply {SUBSCRIPTION_KEY_ENV}"))?
            .set_override_option("server.port", std::env::var(PORT_ENV).ok())
            .with_context(|| format!("Failed to apply {PORT_ENV}"))?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CitycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 {
            return Err(CitycastError::config("Weather API timeout must be at least 1 second").into());
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                CitycastError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.rate_limit.window_seconds == 0 {
            return Err(CitycastError::config("Rate limit window cannot be zero").into());
        }

        if self.rate_limit.api_max_requests == 0 || self.rate_limit.page_max_requests == 0 {
            return Err(CitycastError::config("Rate limits must allow at least one request").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CitycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CitycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(CitycastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

/// Find the `--config` path among command-line arguments (program name excluded)
pub fn config_path_from_args<I, S>(args: I) -> Result<Option<PathBuf>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if arg == CONFIG_FLAG {
            let path = args
                .next()
                .ok_or_else(|| CitycastError::config(format!("{CONFIG_FLAG} requires a path")))?;
            return Ok(Some(PathBuf::from(path.as_ref())));
        }
        if let Some(path) = arg
            .strip_prefix(CONFIG_FLAG)
            .and_then(|rest| rest.strip_prefix('='))
        {
            if path.is_empty() {
                return Err(CitycastError::config(format!("{CONFIG_FLAG} requires a path")).into());
            }
            return Ok(Some(PathBuf::from(path)));
        }
    }
    Ok(None)
}
