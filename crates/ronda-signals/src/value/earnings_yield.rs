//! Trailing earnings yield.

use ronda_traits::{
    IncomeStatementRecord, Result, RondaError, SharesOutstanding,
    stats::{mean, round_to},
};
use serde::{Deserialize, Serialize};

use super::check_close;

/// Configuration for the earnings yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsYieldConfig {
    /// Statements averaged, taken from the front of the feed (default: 4).
    pub periods: usize,
    /// Decimal places kept in the result (default: 3).
    pub decimals: i32,
}

impl Default for EarningsYieldConfig {
    fn default() -> Self {
        Self {
            periods: 4,
            decimals: 3,
        }
    }
}

/// Earnings yield calculator.
///
/// # Formula
///
/// ```text
/// EarningsYield = (mean(net_income over first N statements) / shares) / latest_close
/// ```
///
/// Statements are expected most recent first, which is what
/// [`MarketDataGateway::income_statements`](ronda_traits::MarketDataGateway::income_statements)
/// guarantees. They are not re-sorted here.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarningsYield {
    config: EarningsYieldConfig,
}

impl EarningsYield {
    /// Create a new calculator with the given configuration.
    #[must_use]
    pub const fn new(config: EarningsYieldConfig) -> Self {
        Self { config }
    }

    /// Number of statements averaged.
    #[must_use]
    pub const fn periods(&self) -> usize {
        self.config.periods
    }

    /// Compute the yield.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InsufficientData`] if `shares` is not positive or no
    ///   statements are available
    /// - [`RondaError::InvalidArgument`] if `latest_close` is not a positive price
    pub fn compute(
        &self,
        statements: &[IncomeStatementRecord],
        shares: SharesOutstanding,
        latest_close: f64,
    ) -> Result<f64> {
        let shares = shares.value();
        if !(shares.is_finite() && shares > 0.0) {
            return Err(RondaError::InsufficientData(format!(
                "shares outstanding must be positive, got {shares}"
            )));
        }

        let incomes: Vec<f64> = statements
            .iter()
            .take(self.config.periods)
            .map(|s| s.net_income)
            .collect();
        let average_income = mean(&incomes).ok_or_else(|| {
            RondaError::InsufficientData("no income statements available".to_string())
        })?;

        let latest_close = check_close(latest_close)?;
        let earnings_per_share = average_income / shares;

        Ok(round_to(earnings_per_share / latest_close, self.config.decimals))
    }
}

/// Average net income per share over the latest close, rounded to 3 decimals.
///
/// # Errors
///
/// See [`EarningsYield::compute`].
pub fn earnings_yield(
    statements: &[IncomeStatementRecord],
    shares: SharesOutstanding,
    latest_close: f64,
) -> Result<f64> {
    EarningsYield::default().compute(statements, shares, latest_close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::Date;

    fn statements(incomes: &[f64]) -> Vec<IncomeStatementRecord> {
        incomes
            .iter()
            .enumerate()
            .map(|(i, &net_income)| IncomeStatementRecord {
                period_end: Date::from_ymd_opt(2023 - i as i32, 12, 31).unwrap(),
                net_income,
            })
            .collect()
    }

    #[test]
    fn test_basic_yield() {
        // mean 100M / 10M shares = EPS 10; 10 / 200 = 0.05
        let s = statements(&[90e6, 110e6, 95e6, 105e6]);
        assert_eq!(earnings_yield(&s, SharesOutstanding(10e6), 200.0).unwrap(), 0.05);
    }

    #[test]
    fn test_only_first_four_periods() {
        let s = statements(&[4e6, 4e6, 4e6, 4e6, -1e9]);
        assert_eq!(earnings_yield(&s, SharesOutstanding(1e6), 40.0).unwrap(), 0.1);
    }

    #[test]
    fn test_fewer_periods_average_what_exists() {
        let s = statements(&[6e6, 2e6]);
        assert_eq!(earnings_yield(&s, SharesOutstanding(1e6), 40.0).unwrap(), 0.1);
    }

    #[test]
    fn test_losses_give_negative_yield() {
        let s = statements(&[-5e6, -5e6]);
        assert_eq!(earnings_yield(&s, SharesOutstanding(1e6), 50.0).unwrap(), -0.1);
    }

    #[test]
    fn test_non_positive_shares() {
        let s = statements(&[1e6]);
        for shares in [0.0, -10.0] {
            assert!(matches!(
                earnings_yield(&s, SharesOutstanding(shares), 10.0),
                Err(RondaError::InsufficientData(_))
            ));
        }
        // Shares are checked before anything else.
        assert!(matches!(
            earnings_yield(&[], SharesOutstanding(0.0), 0.0),
            Err(RondaError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_empty_statements() {
        assert!(matches!(
            earnings_yield(&[], SharesOutstanding(1e6), 10.0),
            Err(RondaError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_bad_close() {
        let s = statements(&[1e6]);
        assert!(matches!(
            earnings_yield(&s, SharesOutstanding(1e6), -1.0),
            Err(RondaError::InvalidArgument(_))
        ));
    }
}
