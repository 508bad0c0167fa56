//! Trailing dividend yield.

use ronda_traits::{
    DividendSeries, Result,
    stats::{mean, round_to},
};
use serde::{Deserialize, Serialize};

use super::check_close;

/// Configuration for the dividend yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendYieldConfig {
    /// Most recent dividends averaged (default: 16, four years of quarterlies).
    pub lookback_count: usize,
    /// Decimal places kept in the result (default: 3).
    pub decimals: i32,
}

impl Default for DividendYieldConfig {
    fn default() -> Self {
        Self {
            lookback_count: 16,
            decimals: 3,
        }
    }
}

/// Dividend yield calculator.
///
/// Averages the most recent dividends and divides by the latest close. A
/// ticker with no dividend history scores `0.0`; the result is never NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct DividendYield {
    config: DividendYieldConfig,
}

impl DividendYield {
    /// Create a new calculator with the given configuration.
    #[must_use]
    pub const fn new(config: DividendYieldConfig) -> Self {
        Self { config }
    }

    /// Number of dividends averaged.
    #[must_use]
    pub const fn lookback_count(&self) -> usize {
        self.config.lookback_count
    }

    /// Compute the yield.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidArgument`](ronda_traits::RondaError::InvalidArgument)
    /// if `latest_close` is not a positive price.
    pub fn compute(&self, dividends: &DividendSeries, latest_close: f64) -> Result<f64> {
        let latest_close = check_close(latest_close)?;

        let amounts: Vec<f64> = dividends
            .latest(self.config.lookback_count)
            .iter()
            .map(|d| d.amount)
            .collect();

        let value = mean(&amounts).map_or(0.0, |avg| round_to(avg / latest_close, self.config.decimals));
        Ok(if value.is_nan() { 0.0 } else { value })
    }
}

/// Average of the last `lookback_count` dividends over `latest_close`,
/// rounded to 3 decimals.
///
/// # Errors
///
/// See [`DividendYield::compute`].
pub fn dividend_yield(
    dividends: &DividendSeries,
    latest_close: f64,
    lookback_count: usize,
) -> Result<f64> {
    DividendYield::new(DividendYieldConfig {
        lookback_count,
        ..DividendYieldConfig::default()
    })
    .compute(dividends, latest_close)
}
