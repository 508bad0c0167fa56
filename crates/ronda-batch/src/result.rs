//! Per-ticker partial-success container.

use ronda_traits::{ErrorKind, Metric, Result, Ticker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every metric computed for one ticker.
///
/// A metric is either present as a value or recorded in `errors` with the
/// kind of failure that prevented it, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    /// Ticker the metrics belong to.
    pub ticker: Ticker,
    /// 12-1 momentum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_12_1: Option<f64>,
    /// 12-2 momentum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_12_2: Option<f64>,
    /// Blended 3/6/12 month momentum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_avg: Option<f64>,
    /// 10-month moving-average trend signal, 0 or 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_signal: Option<u8>,
    /// Trailing dividend yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    /// Trailing earnings yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earnings_yield: Option<f64>,
    /// Failure kind per metric that could not be computed.
    #[serde(default)]
    pub errors: BTreeMap<Metric, ErrorKind>,
}

impl RatioResult {
    /// An empty result for `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// A result where every metric failed with `kind`.
    #[must_use]
    pub fn all_failed(ticker: impl Into<Ticker>, kind: ErrorKind) -> Self {
        let mut result = Self::new(ticker);
        result.errors = Metric::ALL.into_iter().map(|m| (m, kind)).collect();
        result
    }

    /// A result for a ticker the batch never started.
    #[must_use]
    pub fn cancelled(ticker: impl Into<Ticker>) -> Self {
        Self::all_failed(ticker, ErrorKind::Cancelled)
    }

    /// Value of `metric` as a float, if it was computed.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Momentum12_1 => self.momentum_12_1,
            Metric::Momentum12_2 => self.momentum_12_2,
            Metric::MomentumAvg => self.momentum_avg,
            Metric::TrendSignal => self.trend_signal.map(f64::from),
            Metric::DividendYield => self.dividend_yield,
            Metric::EarningsYield => self.earnings_yield,
        }
    }

    /// Store the outcome of one metric calculation.
    ///
    /// A trend signal value is stored as `1` when positive, else `0`.
    pub fn record<T: Into<f64>>(&mut self, metric: Metric, outcome: Result<T>) {
        match outcome {
            Ok(value) => {
                let value = value.into();
                self.errors.remove(&metric);
                match metric {
                    Metric::Momentum12_1 => self.momentum_12_1 = Some(value),
                    Metric::Momentum12_2 => self.momentum_12_2 = Some(value),
                    Metric::MomentumAvg => self.momentum_avg = Some(value),
                    Metric::TrendSignal => self.trend_signal = Some(u8::from(value > 0.0)),
                    Metric::DividendYield => self.dividend_yield = Some(value),
                    Metric::EarningsYield => self.earnings_yield = Some(value),
                }
            }
            Err(err) => {
                tracing::warn!(ticker = %self.ticker, %metric, error = %err, "metric failed");
                self.fail(metric, err.kind());
            }
        }
    }

    /// Mark `metric` as failed with `kind`.
    pub fn fail(&mut self, metric: Metric, kind: ErrorKind) {
        match metric {
            Metric::Momentum12_1 => self.momentum_12_1 = None,
            Metric::Momentum12_2 => self.momentum_12_2 = None,
            Metric::MomentumAvg => self.momentum_avg = None,
            Metric::TrendSignal => self.trend_signal = None,
            Metric::DividendYield => self.dividend_yield = None,
            Metric::EarningsYield => self.earnings_yield = None,
        }
        self.errors.insert(metric, kind);
    }

    /// Whether every metric was computed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the ticker was skipped by cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.errors.values().any(|kind| *kind == ErrorKind::Cancelled)
    }

    /// Number of metrics that were computed.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        Metric::ALL
            .into_iter()
            .filter(|m| self.value(*m).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::RondaError;

    #[test]
    fn test_record_value_and_error() {
        let mut result = RatioResult::new("AAPL");
        result.record(Metric::Momentum12_1, Ok(0.1));
        result.record(Metric::TrendSignal, Ok(1_u8));
        result.record::<f64>(
            Metric::EarningsYield,
            Err(RondaError::InsufficientData("no shares".into())),
        );

        assert_eq!(result.momentum_12_1, Some(0.1));
        assert_eq!(result.trend_signal, Some(1));
        assert_eq!(result.value(Metric::TrendSignal), Some(1.0));
        assert_eq!(result.earnings_yield, None);
        assert_eq!(
            result.errors.get(&Metric::EarningsYield),
            Some(&ErrorKind::InsufficientData)
        );
        assert_eq!(result.succeeded(), 2);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_all_failed() {
        let result = RatioResult::cancelled("MSFT");
        assert_eq!(result.errors.len(), 6);
        assert!(result.is_cancelled());
        assert_eq!(result.succeeded(), 0);
    }

    #[test]
    fn test_json_shape() {
        let mut result = RatioResult::new("KO");
        result.record(Metric::DividendYield, Ok(0.031));
        result.fail(Metric::MomentumAvg, ErrorKind::DataUnavailable);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ticker"], "KO");
        assert_eq!(json["dividend_yield"], 0.031);
        assert!(json.get("momentum_12_1").is_none());
        assert_eq!(json["errors"]["momentum_avg"], "data_unavailable");
    }
}
