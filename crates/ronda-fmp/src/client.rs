//! FMP API client implementation.

use crate::{
    Result,
    config::FmpConfig,
    error::FmpError,
    types::{DividendRecord, HistoricalPrice, IncomeStatement, Period, SharesFloat},
};
use chrono::NaiveDate;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::Client;
use std::{fmt, num::NonZeroU32, sync::Arc};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Financial Modeling Prep API client.
///
/// Requests are throttled client-side to the configured per-minute quota and
/// share one connection pool; clones share both.
#[derive(Clone)]
pub struct FmpClient {
    client: Client,
    config: FmpConfig,
    limiter: Arc<DirectRateLimiter>,
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish_non_exhaustive()
    }
}

impl FmpClient {
    /// Create a new FMP client with the given API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(FmpConfig::new(api_key))
    }

    /// Create a new FMP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: FmpConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Ok(Self {
            client,
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            config,
        })
    }

    /// Create a new FMP client from environment variables.
    ///
    /// See [`FmpConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(FmpConfig::from_env()?)
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &FmpConfig {
        &self.config
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        let base = &self.config.base_url;
        if endpoint.contains('?') {
            format!("{base}/{endpoint}&apikey={}", self.config.api_key)
        } else {
            format!("{base}/{endpoint}?apikey={}", self.config.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.limiter.until_ready().await;
        tracing::debug!(endpoint, "fmp request");

        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FmpError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - First date, inclusive
    /// * `to` - Last date, inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HistoricalPrice>> {
        let endpoint = format!(
            "historical-price-eod/full?symbol={}&from={from}&to={to}",
            symbol.to_uppercase()
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get the dividend history for a symbol, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn dividends(&self, symbol: &str) -> Result<Vec<DividendRecord>> {
        let endpoint = format!("dividends?symbol={}", symbol.to_uppercase());
        self.get(&endpoint).await
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "income-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get the current share float for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] if the response is empty, or an
    /// error if the API request fails.
    pub async fn shares_float(&self, symbol: &str) -> Result<SharesFloat> {
        let endpoint = format!("shares-float?symbol={}", symbol.to_uppercase());
        let floats: Vec<SharesFloat> = self.get(&endpoint).await?;
        floats
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }
}
