//! Error types and handling for `citycast`

use thiserror::Error;

/// Advisory shown to clients when a reading is sample data and the
/// provider did not say why.
pub const SAMPLE_DATA_MESSAGE: &str = "Using sample data";

/// Main error type for the `citycast` service
#[derive(Error, Debug)]
pub enum CitycastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather provider answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Non-success status without an error body we could read
    #[error("Upstream returned HTTP {status}")]
    Status { status: u16 },

    /// The weather provider did not answer in time
    #[error("Request timed out after {seconds:.1}s")]
    Timeout { seconds: f64 },

    /// The weather provider answered with something we could not use
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Transport-level HTTP failure
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl CitycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Message attached to a mock reading that replaced a failed upstream call.
    ///
    /// Only the provider's own error text is passed through; everything else
    /// collapses to [`SAMPLE_DATA_MESSAGE`].
    #[must_use]
    pub fn advisory(&self) -> String {
        match self {
            CitycastError::Api { message, .. } => message.clone(),
            _ => SAMPLE_DATA_MESSAGE.to_string(),
        }
    }
}
