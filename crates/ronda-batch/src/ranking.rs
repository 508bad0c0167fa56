//! Cross-sectional ranking of batch results.
//!
//! Results are laid out as a polars [`DataFrame`] with one row per ticker and
//! one column per [`Metric`]; failed metrics are null.

use crate::RatioResult;
use polars::prelude::*;
use ronda_traits::{Metric, Ticker, stats::standardize};
use std::collections::BTreeMap;

/// Name of the ticker column.
pub const TICKER_COLUMN: &str = "ticker";

/// Suffix of z-score columns.
pub const ZSCORE_SUFFIX: &str = "_z";

/// How to order a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSpec {
    /// Metric to sort by (default: `momentum_12_2`).
    pub sort_by: Metric,
    /// Largest first when true (default: false).
    pub descending: bool,
    /// Rows kept after sorting (default: 20).
    pub limit: Option<usize>,
    /// Append a `<metric>_z` column per metric (default: false).
    pub z_scores: bool,
}

impl Default for RankSpec {
    fn default() -> Self {
        Self {
            sort_by: Metric::Momentum12_2,
            descending: false,
            limit: Some(20),
            z_scores: false,
        }
    }
}

/// Lay results out as a table, rows in ticker order.
///
/// # Errors
///
/// Returns an error if the frame cannot be assembled.
pub fn to_frame(results: &BTreeMap<Ticker, RatioResult>) -> PolarsResult<DataFrame> {
    let tickers: Vec<&str> = results.keys().map(String::as_str).collect();
    let mut columns: Vec<Column> = Vec::with_capacity(Metric::ALL.len() + 1);
    columns.push(Series::new(TICKER_COLUMN.into(), tickers).into());

    for metric in Metric::ALL {
        let values: Vec<Option<f64>> = results.values().map(|r| r.value(metric)).collect();
        columns.push(Series::new(metric.as_str().into(), values).into());
    }

    DataFrame::new(columns)
}

/// Sort results by one metric, nulls last, and keep the top rows.
///
/// Z-scores, when requested, are computed over the full cross-section before
/// the limit is applied.
///
/// # Errors
///
/// Returns an error if a polars operation fails.
pub fn rank(results: &BTreeMap<Ticker, RatioResult>, spec: &RankSpec) -> PolarsResult<DataFrame> {
    let mut frame = to_frame(results)?;

    if spec.z_scores {
        for metric in Metric::ALL {
            let values: Vec<Option<f64>> = results.values().map(|r| r.value(metric)).collect();
            let (z, _) = standardize(&values);
            let name = format!("{}{ZSCORE_SUFFIX}", metric.as_str());
            frame.with_column(Series::new(name.as_str().into(), z))?;
        }
    }

    let sorted = frame.sort(
        [spec.sort_by.as_str()],
        SortMultipleOptions::default()
            .with_order_descending(spec.descending)
            .with_nulls_last(true),
    )?;

    Ok(match spec.limit {
        Some(limit) => sorted.head(Some(limit)),
        None => sorted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ronda_traits::ErrorKind;

    fn results() -> BTreeMap<Ticker, RatioResult> {
        [("AAA", Some(0.2)), ("BBB", None), ("CCC", Some(-0.1)), ("DDD", Some(0.5))]
            .into_iter()
            .map(|(ticker, momentum)| {
                let mut result = RatioResult::new(ticker);
                match momentum {
                    Some(value) => result.record(Metric::Momentum12_2, Ok(value)),
                    None => result.fail(Metric::Momentum12_2, ErrorKind::DataUnavailable),
                }
                result.record(Metric::DividendYield, Ok(0.01));
                (ticker.to_string(), result)
            })
            .collect()
    }

    fn tickers(frame: &DataFrame) -> Vec<String> {
        frame
            .column(TICKER_COLUMN)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|s| s.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_frame_layout() {
        let frame = to_frame(&results()).unwrap();
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.width(), 7);
        let momentum = frame.column("momentum_12_2").unwrap();
        assert_eq!(momentum.null_count(), 1);
    }

    #[test]
    fn test_rank_ascending_nulls_last() {
        let frame = rank(&results(), &RankSpec::default()).unwrap();
        assert_eq!(tickers(&frame), vec!["CCC", "AAA", "DDD", "BBB"]);
    }

    #[test]
    fn test_rank_descending_with_limit() {
        let spec = RankSpec {
            descending: true,
            limit: Some(2),
            ..RankSpec::default()
        };
        let frame = rank(&results(), &spec).unwrap();
        assert_eq!(tickers(&frame), vec!["DDD", "AAA"]);
    }

    #[test]
    fn test_zscores_over_full_cross_section() {
        let spec = RankSpec {
            descending: true,
            limit: Some(1),
            z_scores: true,
            ..RankSpec::default()
        };
        let frame = rank(&results(), &spec).unwrap();
        assert_eq!(frame.height(), 1);

        // mean 0.2, sample std 0.3 over {0.2, -0.1, 0.5}
        let z = frame
            .column("momentum_12_2_z")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert_relative_eq!(z, 1.0, epsilon = 1e-9);

        // constant column is not standardized
        let flat = frame
            .column("dividend_yield_z")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert_relative_eq!(flat, 0.0);
    }
}
