//! Bounded retry with exponential backoff and jitter.
//!
//! [`RetryingGateway`] wraps any [`MarketDataGateway`] and retries calls that
//! fail with a transient error (`RateLimited`, `NetworkError`). All other
//! failures pass through on the first attempt. Once its [`Cancellation`]
//! fires, no further attempts are made and the last error is returned.

use crate::Cancellation;
use async_trait::async_trait;
use ronda_traits::{
    DividendSeries, IncomeStatementRecord, Interval, MarketDataGateway, PriceSeries, Result,
    SharesOutstanding, TimeWindow,
};
use std::{future::Future, time::Duration};

/// Backoff strategy between retries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Delay of `base * factor^attempt`, capped at `max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to scale the delay by a random factor in `[0.5, 1.5)`.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(200),
            factor: 2.0,
            max: Duration::from_secs(3),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    #[must_use]
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = (base.as_secs_f64() * factor.powi(exponent)).min(max.as_secs_f64());
                let delay = Duration::from_secs_f64(seconds.max(0.0));
                if jitter {
                    delay.mul_f64(0.5 + fastrand::f64())
                } else {
                    delay
                }
            }
        }
    }
}

/// Configuration for [`RetryingGateway`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    /// Exponential backoff with the given retry bound.
    #[must_use]
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Fixed backoff with the given retry bound.
    #[must_use]
    pub const fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::exponential(0)
    }

    /// Delay before retry number `attempt` (0-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

/// A gateway that retries transient failures of an inner gateway.
#[derive(Debug, Clone)]
pub struct RetryingGateway<G> {
    inner: G,
    config: RetryConfig,
    cancel: Option<Cancellation>,
}

impl<G: MarketDataGateway> RetryingGateway<G> {
    /// Wrap `inner` with the given retry policy.
    #[must_use]
    pub const fn new(inner: G, config: RetryConfig) -> Self {
        Self {
            inner,
            config,
            cancel: None,
        }
    }

    /// Stop retrying once `cancel` fires.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The retry policy.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// The wrapped gateway.
    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    async fn with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        ticker: &str,
        mut call: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    if self.is_cancelled() {
                        tracing::debug!(ticker, operation, error = %err, "cancelled, not retrying");
                        return Err(err);
                    }
                    let delay = self.config.delay_for_attempt(attempt);
                    tracing::warn!(
                        ticker,
                        operation,
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient gateway failure, retrying"
                    );
                    if !self.backoff(delay).await {
                        tracing::debug!(ticker, operation, "cancelled during backoff");
                        return Err(err);
                    }
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(Cancellation::is_cancelled)
    }

    /// Sleep for `delay`; `false` if cancelled first.
    async fn backoff(&self, delay: Duration) -> bool {
        match &self.cancel {
            Some(cancel) => tokio::select! {
                biased;
                () = cancel.cancelled() => false,
                () = tokio::time::sleep(delay) => true,
            },
            None => {
                tokio::time::sleep(delay).await;
                true
            }
        }
    }
}

#[async_trait]
impl<G: MarketDataGateway> MarketDataGateway for RetryingGateway<G> {
    async fn price_history(
        &self,
        ticker: &str,
        window: TimeWindow,
        interval: Interval,
    ) -> Result<PriceSeries> {
        self.with_retry("price_history", ticker, || {
            self.inner.price_history(ticker, window, interval)
        })
        .await
    }

    async fn dividend_history(&self, ticker: &str, lookback_count: usize) -> Result<DividendSeries> {
        self.with_retry("dividend_history", ticker, || {
            self.inner.dividend_history(ticker, lookback_count)
        })
        .await
    }

    async fn income_statements(
        &self,
        ticker: &str,
        periods: usize,
    ) -> Result<Vec<IncomeStatementRecord>> {
        self.with_retry("income_statements", ticker, || {
            self.inner.income_statements(ticker, periods)
        })
        .await
    }

    async fn shares_outstanding(&self, ticker: &str) -> Result<SharesOutstanding> {
        self.with_retry("shares_outstanding", ticker, || {
            self.inner.shares_outstanding(ticker)
        })
        .await
    }
}
