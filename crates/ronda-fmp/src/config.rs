//! Client configuration.

use crate::{Result, error::FmpError};
use std::{env, time::Duration};

/// Base URL for the FMP stable API.
pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Requests per minute allowed by the entry-level FMP plan.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 300;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::FmpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmpConfig {
    /// API key appended to every request.
    pub api_key: String,
    /// API root, without trailing slash.
    pub base_url: String,
    /// Client-side request quota.
    pub requests_per_minute: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FmpConfig {
    /// Create a configuration with default endpoint, quota and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the environment.
    ///
    /// This will also load from a `.env` file if present. Recognised
    /// variables: `FMP_API_KEY` (required), `FMP_BASE_URL`,
    /// `FMP_REQUESTS_PER_MINUTE` and `FMP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a numeric variable does
    /// not parse to a positive integer.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Ok(url) = env::var("FMP_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(rpm) = positive_var("FMP_REQUESTS_PER_MINUTE")? {
            config.requests_per_minute = rpm;
        }
        if let Some(secs) = positive_var("FMP_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(u64::from(secs));
        }

        Ok(config)
    }

    /// Override the request quota.
    #[must_use]
    pub const fn with_requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Override the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn positive_var(name: &'static str) -> Result<Option<u32>> {
    match env::var(name) {
        Ok(raw) => parse_positive(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(FmpError::InvalidConfig {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FmpConfig::new("key");
        assert_eq!(config.base_url, FMP_BASE_URL);
        assert_eq!(config.requests_per_minute, 300);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("X", " 120 ").unwrap(), 120);
        assert!(matches!(
            parse_positive("X", "0"),
            Err(FmpError::InvalidConfig { name: "X", .. })
        ));
        assert!(parse_positive("X", "fast").is_err());
    }
}
