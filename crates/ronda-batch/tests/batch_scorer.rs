//! Batch scorer behaviour against an in-memory gateway.

use approx::assert_relative_eq;
use async_trait::async_trait;
use chrono::{Days, Months, NaiveDate};
use ronda_batch::{BatchConfig, BatchScorer, Cancellation, RetryConfig};
use ronda_signals::window::resolve_date;
use ronda_traits::{
    Dividend, DividendSeries, ErrorKind, IncomeStatementRecord, Interval, MarketDataGateway,
    Metric, PriceBar, PriceSeries, Result, RondaError, SharesOutstanding, TimeWindow,
};
use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        Arc,
        atomic::{AtomicU32, AtomicUsize, Ordering},
    },
    time::Duration,
};

#[derive(Clone)]
struct Fixture {
    daily: PriceSeries,
    weekly: PriceSeries,
    dividends: DividendSeries,
    income: Vec<IncomeStatementRecord>,
    shares: f64,
}

/// Serves fixtures by ticker; unknown tickers are `DataUnavailable`.
#[derive(Default)]
struct ScriptedGateway {
    fixtures: HashMap<String, Fixture>,
    latency: Option<Duration>,
    /// `shares_outstanding` fails with `RateLimited` this many times first.
    rate_limited_calls: AtomicU32,
    shares_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGateway {
    fn with(tickers: &[&str], window: TimeWindow) -> Self {
        let fixtures = tickers
            .iter()
            .map(|t| ((*t).to_string(), fixture(window)))
            .collect();
        Self {
            fixtures,
            ..Self::default()
        }
    }

    fn get(&self, ticker: &str) -> Result<&Fixture> {
        self.fixtures
            .get(ticker)
            .ok_or_else(|| RondaError::DataUnavailable(format!("unknown ticker {ticker}")))
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl MarketDataGateway for ScriptedGateway {
    async fn price_history(
        &self,
        ticker: &str,
        _window: TimeWindow,
        interval: Interval,
    ) -> Result<PriceSeries> {
        self.pause().await;
        let fixture = self.get(ticker)?;
        Ok(match interval {
            Interval::Daily => fixture.daily.clone(),
            Interval::Weekly => fixture.weekly.clone(),
        })
    }

    async fn dividend_history(&self, ticker: &str, _lookback_count: usize) -> Result<DividendSeries> {
        self.pause().await;
        Ok(self.get(ticker)?.dividends.clone())
    }

    async fn income_statements(
        &self,
        ticker: &str,
        _periods: usize,
    ) -> Result<Vec<IncomeStatementRecord>> {
        self.pause().await;
        Ok(self.get(ticker)?.income.clone())
    }

    async fn shares_outstanding(&self, ticker: &str) -> Result<SharesOutstanding> {
        self.shares_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.pause().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let throttled = self
            .rate_limited_calls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if throttled {
            return Err(RondaError::RateLimited("429".into()));
        }
        Ok(SharesOutstanding(self.get(ticker)?.shares))
    }
}

fn window() -> TimeWindow {
    resolve_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap()
}

/// Flat at 100 with the last two daily closes at 105 and 110.
fn fixture(window: TimeWindow) -> Fixture {
    let days = window.end().signed_duration_since(window.start()).num_days() as u64;
    let daily: PriceSeries = (0..=days)
        .map(|i| {
            let close = match days - i {
                0 => 110.0,
                1 => 105.0,
                _ => 100.0,
            };
            PriceBar::new(window.start() + Days::new(i), close)
        })
        .collect();

    // One bar on the 28th of each of the 13 months, latest at 110.
    let weekly: PriceSeries = (0..=12)
        .map(|m| {
            let close = if m == 12 { 110.0 } else { 100.0 };
            PriceBar::new(window.start() + Months::new(m), close)
        })
        .collect();

    let dividends = DividendSeries::new(
        (1..=4)
            .map(|q| Dividend {
                ex_date: window.start() + Months::new(q * 3 - 1),
                amount: 0.5,
            })
            .collect(),
    );

    let income = (0..4)
        .map(|y| IncomeStatementRecord {
            period_end: NaiveDate::from_ymd_opt(2023 - y, 12, 31).unwrap(),
            net_income: 1000.0,
        })
        .collect();

    Fixture {
        daily,
        weekly,
        dividends,
        income,
        shares: 100.0,
    }
}

fn tickers(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|t| (*t).to_string()).collect()
}

fn scorer(gateway: impl MarketDataGateway + 'static, config: BatchConfig) -> BatchScorer {
    BatchScorer::new(Arc::new(gateway), config)
}

#[tokio::test]
async fn scores_valid_ticker_and_isolates_unknown_one() {
    let window = window();
    let scorer = scorer(ScriptedGateway::with(&["A"], window), BatchConfig::default());

    let results = scorer.score_tickers(&tickers(&["A", "B"]), window, 2).await.unwrap();
    assert_eq!(results.len(), 2);

    let a = &results["A"];
    assert!(a.is_complete(), "unexpected errors: {:?}", a.errors);
    assert_relative_eq!(a.momentum_12_1.unwrap(), 0.1);
    assert_relative_eq!(a.momentum_12_2.unwrap(), 0.05);
    assert_relative_eq!(a.momentum_avg.unwrap(), 1.1);
    assert_eq!(a.trend_signal, Some(1));
    assert_relative_eq!(a.dividend_yield.unwrap(), 0.005);
    assert_relative_eq!(a.earnings_yield.unwrap(), 0.091);

    let b = &results["B"];
    assert_eq!(b.succeeded(), 0);
    assert_eq!(b.errors.len(), Metric::ALL.len());
    assert_eq!(b.errors[&Metric::Momentum12_1], ErrorKind::DataUnavailable);
    assert!(b.errors.values().all(|k| *k == ErrorKind::DataUnavailable));
}

#[tokio::test]
async fn rejects_invalid_arguments() {
    let window = window();
    let scorer = scorer(ScriptedGateway::with(&["A"], window), BatchConfig::default());

    let err = scorer.score_tickers(&BTreeSet::new(), window, 4).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = scorer.score_tickers(&tickers(&["A"]), window, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn short_history_fails_only_dependent_metrics() {
    let window = window();
    let mut gateway = ScriptedGateway::with(&["S"], window);
    if let Some(fixture) = gateway.fixtures.get_mut("S") {
        let recent = fixture.daily.bars()[fixture.daily.len() - 10..].to_vec();
        fixture.daily = PriceSeries::new(recent);
        fixture.dividends = DividendSeries::default();
    }
    let scorer = scorer(gateway, BatchConfig::default());

    let results = scorer.score(&tickers(&["S"]), window).await.unwrap();
    let s = &results["S"];
    assert_eq!(s.errors.len(), 1);
    assert_eq!(s.errors[&Metric::MomentumAvg], ErrorKind::InsufficientData);
    assert_relative_eq!(s.momentum_12_1.unwrap(), 0.1);
    assert_relative_eq!(s.dividend_yield.unwrap(), 0.0);
}

#[tokio::test]
async fn zero_shares_fail_earnings_yield_as_insufficient() {
    let window = window();
    let mut gateway = ScriptedGateway::with(&["Z"], window);
    if let Some(fixture) = gateway.fixtures.get_mut("Z") {
        fixture.shares = 0.0;
    }
    let scorer = scorer(gateway, BatchConfig::default());

    let results = scorer.score(&tickers(&["Z"]), window).await.unwrap();
    let z = &results["Z"];
    assert_eq!(z.errors.len(), 1);
    assert_eq!(z.errors[&Metric::EarningsYield], ErrorKind::InsufficientData);
}

#[tokio::test]
async fn pre_cancelled_batch_marks_every_ticker() {
    let window = window();
    let scorer = scorer(ScriptedGateway::with(&["A", "C"], window), BatchConfig::default());
    let cancel = Cancellation::new();
    cancel.cancel();

    let results = scorer
        .score_tickers_with_cancel(&tickers(&["A", "C"]), window, 1, &cancel)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for result in results.values() {
        assert!(result.is_cancelled());
        assert_eq!(result.errors[&Metric::EarningsYield], ErrorKind::Cancelled);
    }
}

#[tokio::test(start_paused = true)]
async fn deadline_lets_in_flight_ticker_finish() {
    let window = window();
    let mut gateway = ScriptedGateway::with(&["A", "C"], window);
    gateway.latency = Some(Duration::from_secs(10));
    let config = BatchConfig {
        deadline: Some(Duration::from_secs(1)),
        ..BatchConfig::default()
    };
    let scorer = scorer(gateway, config);

    let results = scorer.score_tickers(&tickers(&["A", "C"]), window, 1).await.unwrap();

    let complete = results.values().filter(|r| r.is_complete()).count();
    let cancelled = results.values().filter(|r| r.is_cancelled()).count();
    assert_eq!((complete, cancelled), (1, 1));
}

#[tokio::test(start_paused = true)]
async fn concurrency_limit_bounds_tickers_in_flight() {
    let window = window();
    let names = ["A", "B", "C", "D", "E"];
    let mut gateway = ScriptedGateway::with(&names, window);
    gateway.latency = Some(Duration::from_millis(100));
    let gateway = Arc::new(gateway);
    let scorer = BatchScorer::new(gateway.clone(), BatchConfig::default());

    let results = scorer.score_tickers(&tickers(&names), window, 2).await.unwrap();

    assert!(results.values().all(|r| r.is_complete()));
    assert_eq!(gateway.max_in_flight.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried() {
    let window = window();
    let gateway = ScriptedGateway::with(&["A"], window);
    gateway.rate_limited_calls.store(2, Ordering::SeqCst);
    let config = BatchConfig {
        retry: RetryConfig::exponential(3),
        ..BatchConfig::default()
    };
    let scorer = scorer(gateway, config);

    let results = scorer.score(&tickers(&["A"]), window).await.unwrap();
    assert!(results["A"].is_complete());
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_as_metric_failure() {
    let window = window();
    let gateway = Arc::new(ScriptedGateway::with(&["A"], window));
    gateway.rate_limited_calls.store(10, Ordering::SeqCst);
    let config = BatchConfig {
        retry: RetryConfig::fixed(Duration::from_millis(10), 2),
        ..BatchConfig::default()
    };
    let scorer = BatchScorer::new(gateway.clone(), config);

    let results = scorer.score(&tickers(&["A"]), window).await.unwrap();
    let a = &results["A"];
    assert_eq!(a.errors.len(), 1);
    assert_eq!(a.errors[&Metric::EarningsYield], ErrorKind::RateLimited);
    assert!(a.momentum_12_1.is_some());
    assert_eq!(gateway.shares_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn deadline_stops_retries_of_running_ticker() {
    let window = window();
    let mut gateway = ScriptedGateway::with(&["A"], window);
    gateway.latency = Some(Duration::from_millis(100));
    gateway.rate_limited_calls.store(10, Ordering::SeqCst);
    let gateway = Arc::new(gateway);
    let config = BatchConfig {
        deadline: Some(Duration::from_millis(50)),
        retry: RetryConfig::fixed(Duration::from_secs(5), 3),
        ..BatchConfig::default()
    };
    let scorer = BatchScorer::new(gateway.clone(), config);

    let start = tokio::time::Instant::now();
    let results = scorer.score(&tickers(&["A"]), window).await.unwrap();

    // The call in flight at the deadline completes; nothing is retried after it.
    assert_eq!(gateway.shares_calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(1));

    let a = &results["A"];
    assert!(!a.is_cancelled());
    assert_eq!(a.errors.len(), 1);
    assert_eq!(a.errors[&Metric::EarningsYield], ErrorKind::RateLimited);
}
