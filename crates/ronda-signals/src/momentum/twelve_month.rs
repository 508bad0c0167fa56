//! Twelve-month momentum measured against the first bar of the window.

use ronda_traits::{Metric, PriceSeries, Result, RondaError, stats::round_to};
use serde::{Deserialize, Serialize};

/// Configuration for twelve-month momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Bar to measure, counted from the end of the series (`-1` is the latest).
    pub lookback_index: isize,
    /// Decimal places kept in the result (default: 3).
    pub decimals: i32,
}

impl MomentumConfig {
    /// Latest close against the first close (12-1 momentum).
    #[must_use]
    pub const fn twelve_one() -> Self {
        Self {
            lookback_index: -1,
            decimals: 3,
        }
    }

    /// Second-latest close against the first close (12-2 momentum).
    #[must_use]
    pub const fn twelve_two() -> Self {
        Self {
            lookback_index: -2,
            decimals: 3,
        }
    }
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self::twelve_one()
    }
}

/// Twelve-month momentum calculator.
///
/// Computes `close[lookback_index] / close[0] - 1` over a daily series that
/// spans the lookback window.
///
/// # Example
///
/// ```ignore
/// use ronda_signals::momentum::{Momentum, MomentumConfig};
///
/// let twelve_two = Momentum::new(MomentumConfig::twelve_two());
/// let score = twelve_two.compute(&daily_series)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Create a new momentum calculator with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Get the configured lookback index.
    #[must_use]
    pub const fn lookback_index(&self) -> isize {
        self.config.lookback_index
    }

    /// The metric this configuration reports, if it is one of the standard two.
    #[must_use]
    pub const fn metric(&self) -> Option<Metric> {
        match self.config.lookback_index {
            -1 => Some(Metric::Momentum12_1),
            -2 => Some(Metric::Momentum12_2),
            _ => None,
        }
    }

    /// Compute the score.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InvalidArgument`] if the lookback index is not negative
    /// - [`RondaError::InsufficientData`] if the series is empty or shorter
    ///   than `|lookback_index| + 1` bars
    /// - [`RondaError::DataUnavailable`] if the first close is not a positive
    ///   number
    pub fn compute(&self, series: &PriceSeries) -> Result<f64> {
        let index = self.config.lookback_index;
        if index >= 0 {
            return Err(RondaError::InvalidArgument(format!(
                "lookback index must count from the end, got {index}"
            )));
        }
        if series.is_empty() || index.unsigned_abs() >= series.len() {
            return Err(RondaError::InsufficientData(format!(
                "momentum at index {index} needs more than {} bars, got {}",
                index.unsigned_abs(),
                series.len()
            )));
        }

        let (Some(first), Some(target)) = (series.first_close(), series.close_at(index)) else {
            return Err(RondaError::InsufficientData(format!(
                "no close at index {index}"
            )));
        };
        if !(first.is_finite() && first > 0.0) {
            return Err(RondaError::DataUnavailable(format!(
                "first close {first} is not a positive price"
            )));
        }

        Ok(round_to(target / first - 1.0, self.config.decimals))
    }
}

/// `close[lookback_index] / close[0] - 1`, rounded to 3 decimals.
///
/// # Errors
///
/// See [`Momentum::compute`].
pub fn momentum(series: &PriceSeries, lookback_index: isize) -> Result<f64> {
    Momentum::new(MomentumConfig {
        lookback_index,
        ..MomentumConfig::default()
    })
    .compute(series)
}
