//! Error types for the FMP API client.

use ronda_traits::RondaError;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// A configuration value could not be parsed.
    #[error("Invalid configuration for {name}: {value}")]
    InvalidConfig {
        /// Variable or field name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status.
    #[error("FMP API error: HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// API returned an error payload.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded for FMP API")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<FmpError> for RondaError {
    fn from(err: FmpError) -> Self {
        let message = err.to_string();
        match err {
            FmpError::RateLimitExceeded => Self::RateLimited(message),
            FmpError::Http { status: 429, .. } => Self::RateLimited(message),
            FmpError::Http {
                status: 408 | 500..=599,
                ..
            } => Self::Network(message),
            FmpError::Request(e) if e.is_decode() => Self::DataUnavailable(message),
            FmpError::Request(_) => Self::Network(message),
            FmpError::MissingApiKey | FmpError::InvalidConfig { .. } => {
                Self::InvalidArgument(message)
            }
            FmpError::Http { .. }
            | FmpError::Json(_)
            | FmpError::Api(_)
            | FmpError::SymbolNotFound(_)
            | FmpError::NoData(_) => Self::DataUnavailable(message),
        }
    }
}
