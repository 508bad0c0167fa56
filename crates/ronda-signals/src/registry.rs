//! Metric registry for discovering what the engine computes.
//!
//! This module provides metadata for every [`Metric`]: what it measures, which
//! price interval it reads and whether it needs fundamental data.

use ronda_traits::{Interval, Metric};
use serde::{Deserialize, Serialize};

/// Metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Price momentum metrics
    Momentum,
    /// Trend-following indicators
    Trend,
    /// Valuation metrics comparing payouts or earnings to price
    Value,
}

impl MetricCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Price momentum over the lookback window",
            Self::Trend => "Price relative to its own moving average",
            Self::Value => "Payouts and earnings relative to price",
        }
    }
}

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// The metric described
    pub metric: Metric,

    /// Category classification
    pub category: MetricCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Price interval the metric reads
    pub interval: Interval,

    /// Whether the metric requires fundamental data
    pub requires_fundamentals: bool,
}

/// Get information about all metrics, in reporting order.
#[must_use]
pub fn available_metrics() -> Vec<MetricInfo> {
    Metric::ALL.into_iter().map(metric_info).collect()
}

/// Get information about one metric.
#[must_use]
pub const fn metric_info(metric: Metric) -> MetricInfo {
    let (category, description, interval, requires_fundamentals) = match metric {
        Metric::Momentum12_1 => (
            MetricCategory::Momentum,
            "Latest close over first close of the window, minus one",
            Interval::Daily,
            false,
        ),
        Metric::Momentum12_2 => (
            MetricCategory::Momentum,
            "Second-latest close over first close of the window, minus one",
            Interval::Daily,
            false,
        ),
        Metric::MomentumAvg => (
            MetricCategory::Momentum,
            "Mean of 3, 6 and 12 month price ratios to the latest close",
            Interval::Daily,
            false,
        ),
        Metric::TrendSignal => (
            MetricCategory::Trend,
            "1 if the latest close is above the 10-month moving average",
            Interval::Weekly,
            false,
        ),
        Metric::DividendYield => (
            MetricCategory::Value,
            "Mean of the last 16 dividends over the latest close",
            Interval::Daily,
            false,
        ),
        Metric::EarningsYield => (
            MetricCategory::Value,
            "Mean net income per share of the last 4 years over the latest close",
            Interval::Daily,
            true,
        ),
    };

    MetricInfo {
        metric,
        category,
        description,
        interval,
        requires_fundamentals,
    }
}

/// Get metrics by category.
#[must_use]
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_metrics() {
        let metrics = available_metrics();
        assert_eq!(metrics.len(), 6);
        assert_eq!(metrics[0].metric, Metric::Momentum12_1);
    }

    #[test]
    fn test_intervals() {
        assert_eq!(metric_info(Metric::TrendSignal).interval, Interval::Weekly);
        assert_eq!(metric_info(Metric::MomentumAvg).interval, Interval::Daily);
    }

    #[test]
    fn test_by_category() {
        assert_eq!(metrics_by_category(MetricCategory::Momentum).len(), 3);
        assert_eq!(metrics_by_category(MetricCategory::Trend).len(), 1);

        let value = metrics_by_category(MetricCategory::Value);
        assert_eq!(value.len(), 2);
        assert!(value.iter().any(|m| m.requires_fundamentals));
    }
}
