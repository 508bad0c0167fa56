//! Blended multi-horizon momentum.

use ronda_traits::{PriceSeries, Result, RondaError, stats::round_to};
use serde::{Deserialize, Serialize};

/// Configuration for the momentum average.
///
/// Offsets are counted in daily bars back from the latest close and stand in
/// for calendar months (66 bars ≈ 3 months, 132 bars ≈ 6 months); the
/// twelve-month leg always uses the first bar of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumAverageConfig {
    /// Bars back for the short leg (default: 66).
    pub short_offset: usize,
    /// Bars back for the medium leg (default: 132).
    pub medium_offset: usize,
    /// Minimum series length (default: 133).
    pub min_bars: usize,
    /// Decimal places kept in the result (default: 2).
    pub decimals: i32,
}

impl Default for MomentumAverageConfig {
    fn default() -> Self {
        Self {
            short_offset: 66,
            medium_offset: 132,
            min_bars: 133,
            decimals: 2,
        }
    }
}

/// Momentum average calculator.
///
/// Each leg is the ratio `latest / past` (not a return), so a flat series
/// scores `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumAverage {
    config: MomentumAverageConfig,
}

impl MomentumAverage {
    /// Create a new calculator with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumAverageConfig) -> Self {
        Self { config }
    }

    /// Minimum number of daily bars required.
    #[must_use]
    pub const fn min_bars(&self) -> usize {
        self.config.min_bars
    }

    /// Compute the blended score.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InsufficientData`] with fewer than `min_bars` bars
    /// - [`RondaError::DataUnavailable`] if a reference close is not positive
    pub fn compute(&self, series: &PriceSeries) -> Result<f64> {
        let needed = self
            .config
            .min_bars
            .max(self.config.medium_offset)
            .max(self.config.short_offset);
        if series.len() < needed {
            return Err(RondaError::InsufficientData(format!(
                "momentum average needs {needed} daily bars, got {}",
                series.len()
            )));
        }

        let latest = series
            .latest_close()
            .ok_or_else(|| RondaError::InsufficientData("empty series".to_string()))?;

        let legs = [
            back(series, self.config.short_offset),
            back(series, self.config.medium_offset),
            series.first_close(),
        ];

        let mut total = 0.0;
        for past in legs {
            let past = past.ok_or_else(|| {
                RondaError::InsufficientData("reference bar outside series".to_string())
            })?;
            if !(past.is_finite() && past > 0.0) {
                return Err(RondaError::DataUnavailable(format!(
                    "reference close {past} is not a positive price"
                )));
            }
            total += latest / past;
        }

        Ok(round_to(total / legs.len() as f64, self.config.decimals))
    }
}

fn back(series: &PriceSeries, offset: usize) -> Option<f64> {
    let index = isize::try_from(offset).ok()?;
    series.close_at(-index)
}

/// Average of the 3, 6 and 12 month price ratios, rounded to 2 decimals.
///
/// # Errors
///
/// See [`MomentumAverage::compute`].
pub fn momentum_average(series: &PriceSeries) -> Result<f64> {
    MomentumAverage::default().compute(series)
}
