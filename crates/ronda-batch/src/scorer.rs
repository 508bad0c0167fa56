//! Concurrent scoring of a ticker set.

use crate::{Cancellation, RatioResult, RetryConfig, RetryingGateway};
use ronda_signals::{
    momentum::{Momentum, MomentumAverage, MomentumConfig},
    trend::TrendSignal,
    value::{DividendYield, DividendYieldConfig, EarningsYield, EarningsYieldConfig},
};
use ronda_traits::{
    DividendSeries, IncomeStatementRecord, Interval, MarketDataGateway, Metric, PriceSeries,
    Result, RondaError, SharesOutstanding, Ticker, TimeWindow,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
    time::Duration,
};
use tokio::sync::Semaphore;

/// Configuration for [`BatchScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchConfig {
    /// Tickers scored at once (default: 4).
    pub concurrency_limit: usize,
    /// Cancel the batch after this long (default: none).
    pub deadline: Option<Duration>,
    /// Retry policy for transient gateway failures; retries stop once the
    /// batch is cancelled (default: [`RetryConfig::default`]).
    pub retry: RetryConfig,
    /// Dividends averaged for the dividend yield (default: 16).
    pub dividend_lookback: usize,
    /// Income statements averaged for the earnings yield (default: 4).
    pub income_periods: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 4,
            deadline: None,
            retry: RetryConfig::default(),
            dividend_lookback: 16,
            income_periods: 4,
        }
    }
}

/// The calculators applied to every ticker.
#[derive(Debug, Clone, Copy)]
struct Calculators {
    momentum_12_1: Momentum,
    momentum_12_2: Momentum,
    momentum_avg: MomentumAverage,
    trend: TrendSignal,
    dividend: DividendYield,
    earnings: EarningsYield,
}

impl Calculators {
    fn new(config: &BatchConfig) -> Self {
        Self {
            momentum_12_1: Momentum::new(MomentumConfig::twelve_one()),
            momentum_12_2: Momentum::new(MomentumConfig::twelve_two()),
            momentum_avg: MomentumAverage::default(),
            trend: TrendSignal::default(),
            dividend: DividendYield::new(DividendYieldConfig {
                lookback_count: config.dividend_lookback,
                ..DividendYieldConfig::default()
            }),
            earnings: EarningsYield::new(EarningsYieldConfig {
                periods: config.income_periods,
                ..EarningsYieldConfig::default()
            }),
        }
    }
}

/// Scores sets of tickers against one gateway with bounded fan-out.
///
/// # Example
///
/// ```ignore
/// use ronda_batch::{BatchConfig, BatchScorer};
///
/// let scorer = BatchScorer::new(gateway, BatchConfig::default());
/// let results = scorer.score(&tickers, window).await?;
/// for (ticker, result) in &results {
///     println!("{ticker}: {:?}", result.momentum_12_1);
/// }
/// ```
#[derive(Clone)]
pub struct BatchScorer {
    gateway: Arc<dyn MarketDataGateway>,
    config: BatchConfig,
    calculators: Calculators,
}

impl fmt::Debug for BatchScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchScorer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BatchScorer {
    /// Create a scorer over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn MarketDataGateway>, config: BatchConfig) -> Self {
        Self {
            gateway,
            calculators: Calculators::new(&config),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Score `tickers` with the configured concurrency limit.
    ///
    /// # Errors
    ///
    /// See [`BatchScorer::score_tickers`].
    pub async fn score(
        &self,
        tickers: &BTreeSet<Ticker>,
        window: TimeWindow,
    ) -> Result<BTreeMap<Ticker, RatioResult>> {
        self.score_tickers(tickers, window, self.config.concurrency_limit)
            .await
    }

    /// Score every ticker, at most `concurrency_limit` at a time.
    ///
    /// Per-metric failures are captured in each [`RatioResult`]; the call
    /// itself only fails on invalid arguments.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidArgument`] if `tickers` is empty or
    /// `concurrency_limit` is zero.
    pub async fn score_tickers(
        &self,
        tickers: &BTreeSet<Ticker>,
        window: TimeWindow,
        concurrency_limit: usize,
    ) -> Result<BTreeMap<Ticker, RatioResult>> {
        self.score_tickers_with_cancel(tickers, window, concurrency_limit, &Cancellation::new())
            .await
    }

    /// Like [`BatchScorer::score_tickers`], stopping early once `cancel` fires.
    ///
    /// Tickers not yet started when cancellation (or the configured deadline)
    /// fires are returned with every metric marked `Cancelled`. Tickers already
    /// running keep their in-flight calls but issue no further retries.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidArgument`] if `tickers` is empty or
    /// `concurrency_limit` is zero.
    pub async fn score_tickers_with_cancel(
        &self,
        tickers: &BTreeSet<Ticker>,
        window: TimeWindow,
        concurrency_limit: usize,
        cancel: &Cancellation,
    ) -> Result<BTreeMap<Ticker, RatioResult>> {
        if tickers.is_empty() {
            return Err(RondaError::InvalidArgument("ticker set is empty".to_string()));
        }
        if concurrency_limit == 0 {
            return Err(RondaError::InvalidArgument(
                "concurrency limit must be at least 1".to_string(),
            ));
        }

        tracing::info!(
            tickers = tickers.len(),
            concurrency_limit,
            %window,
            "scoring batch"
        );

        let deadline = self.config.deadline.map(|after| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                tracing::warn!(deadline = ?after, "batch deadline reached");
                cancel.cancel();
            })
        });

        let semaphore = Arc::new(Semaphore::new(concurrency_limit.min(Semaphore::MAX_PERMITS)));
        let mut handles = Vec::with_capacity(tickers.len());

        for ticker in tickers {
            let gateway = Arc::clone(&self.gateway);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let calculators = self.calculators;
            let retry = self.config.retry;
            let task_ticker = ticker.clone();

            let handle = tokio::spawn(async move {
                let permit = tokio::select! {
                    biased;
                    () = cancel.cancelled() => None,
                    permit = semaphore.acquire_owned() => permit.ok(),
                };
                match permit {
                    Some(_permit) if !cancel.is_cancelled() => {
                        let gateway = RetryingGateway::new(gateway, retry).with_cancellation(cancel);
                        score_ticker(&gateway, &task_ticker, window, &calculators).await
                    }
                    _ => RatioResult::cancelled(task_ticker),
                }
            });
            handles.push((ticker.clone(), handle));
        }

        let mut results = BTreeMap::new();
        for (ticker, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(_) => RatioResult::cancelled(ticker.as_str()),
            };
            results.insert(ticker, result);
        }

        if let Some(deadline) = deadline {
            deadline.abort();
        }

        let complete = results.values().filter(|r| r.is_complete()).count();
        let cancelled = results.values().filter(|r| r.is_cancelled()).count();
        tracing::info!(
            tickers = results.len(),
            complete,
            partial = results.len() - complete - cancelled,
            cancelled,
            "batch finished"
        );

        Ok(results)
    }
}

/// Fetch every feed for one ticker concurrently and run all calculators.
async fn score_ticker(
    gateway: &dyn MarketDataGateway,
    ticker: &str,
    window: TimeWindow,
    calculators: &Calculators,
) -> RatioResult {
    let (daily, weekly, dividends, income, shares) = tokio::join!(
        gateway.price_history(ticker, window, Interval::Daily),
        gateway.price_history(ticker, window, Interval::Weekly),
        gateway.dividend_history(ticker, calculators.dividend.lookback_count()),
        gateway.income_statements(ticker, calculators.earnings.periods()),
        gateway.shares_outstanding(ticker),
    );

    let mut result = RatioResult::new(ticker);

    match &daily {
        Ok(series) => {
            result.record(Metric::Momentum12_1, calculators.momentum_12_1.compute(series));
            result.record(Metric::Momentum12_2, calculators.momentum_12_2.compute(series));
            result.record(Metric::MomentumAvg, calculators.momentum_avg.compute(series));
        }
        Err(err) => {
            for metric in [Metric::Momentum12_1, Metric::Momentum12_2, Metric::MomentumAvg] {
                result.record::<f64>(metric, Err(err.clone()));
            }
        }
    }
    result.record(
        Metric::TrendSignal,
        weekly.and_then(|s| calculators.trend.compute(&s, window)),
    );

    let latest_close = daily.and_then(|s| latest_close(&s));
    result.record(
        Metric::DividendYield,
        dividend_yield(calculators, latest_close.clone(), dividends),
    );
    result.record(
        Metric::EarningsYield,
        earnings_yield(calculators, latest_close, income, shares),
    );

    result
}

fn latest_close(series: &PriceSeries) -> Result<f64> {
    series
        .latest_close()
        .ok_or_else(|| RondaError::InsufficientData("empty price series".to_string()))
}

fn dividend_yield(
    calculators: &Calculators,
    latest_close: Result<f64>,
    dividends: Result<DividendSeries>,
) -> Result<f64> {
    let latest_close = latest_close?;
    calculators.dividend.compute(&dividends?, latest_close)
}

fn earnings_yield(
    calculators: &Calculators,
    latest_close: Result<f64>,
    income: Result<Vec<IncomeStatementRecord>>,
    shares: Result<SharesOutstanding>,
) -> Result<f64> {
    let latest_close = latest_close?;
    let shares = shares?;
    // A non-positive share count is reported ahead of a missing income feed.
    let income = match income {
        Ok(income) => income,
        Err(_) if shares.value() <= 0.0 => Vec::new(),
        Err(err) => return Err(err),
    };
    calculators.earnings.compute(&income, shares, latest_close)
}
