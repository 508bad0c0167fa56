//! Market data gateway contract.
//!
//! The ratio engine never talks to a provider directly. It consumes four
//! feeds through [`MarketDataGateway`]; concrete adapters (HTTP clients,
//! in-memory fixtures, retry wrappers) implement it.
//!
//! # Failure contract
//!
//! - [`RondaError::DataUnavailable`] for unknown tickers and empty or
//!   malformed payloads
//! - [`RondaError::RateLimited`] when the provider throttles
//! - [`RondaError::Network`] for transport failures
//!
//! [`RondaError::DataUnavailable`]: crate::RondaError::DataUnavailable
//! [`RondaError::RateLimited`]: crate::RondaError::RateLimited
//! [`RondaError::Network`]: crate::RondaError::Network

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    DividendSeries, IncomeStatementRecord, Interval, PriceSeries, Result, SharesOutstanding,
    TimeWindow,
};

/// Source of price, dividend and fundamental data for a ticker.
///
/// Implementations must be thread-safe so one gateway can serve a whole
/// batch of concurrent ticker computations.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Close prices for `ticker` inside `window`, oldest first.
    async fn price_history(
        &self,
        ticker: &str,
        window: TimeWindow,
        interval: Interval,
    ) -> Result<PriceSeries>;

    /// The last `lookback_count` dividends, oldest first. An empty series
    /// means the ticker pays no dividends and is not an error.
    async fn dividend_history(&self, ticker: &str, lookback_count: usize) -> Result<DividendSeries>;

    /// Up to `periods` annual income statements, most recent period first.
    async fn income_statements(
        &self,
        ticker: &str,
        periods: usize,
    ) -> Result<Vec<IncomeStatementRecord>>;

    /// Current shares outstanding.
    async fn shares_outstanding(&self, ticker: &str) -> Result<SharesOutstanding>;
}

#[async_trait]
impl<G: MarketDataGateway + ?Sized> MarketDataGateway for Arc<G> {
    async fn price_history(
        &self,
        ticker: &str,
        window: TimeWindow,
        interval: Interval,
    ) -> Result<PriceSeries> {
        (**self).price_history(ticker, window, interval).await
    }

    async fn dividend_history(&self, ticker: &str, lookback_count: usize) -> Result<DividendSeries> {
        (**self).dividend_history(ticker, lookback_count).await
    }

    async fn income_statements(
        &self,
        ticker: &str,
        periods: usize,
    ) -> Result<Vec<IncomeStatementRecord>> {
        (**self).income_statements(ticker, periods).await
    }

    async fn shares_outstanding(&self, ticker: &str) -> Result<SharesOutstanding> {
        (**self).shares_outstanding(ticker).await
    }
}
