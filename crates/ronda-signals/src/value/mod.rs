//! Value scores: trailing payouts and earnings relative to the latest close.
//!
//! Both calculators take the latest close as an argument so one price fetch
//! can feed the two of them.

mod dividend_yield;
mod earnings_yield;

pub use dividend_yield::{DividendYield, DividendYieldConfig, dividend_yield};
pub use earnings_yield::{EarningsYield, EarningsYieldConfig, earnings_yield};

use ronda_traits::{Result, RondaError};

/// Reject closes a yield cannot be divided by.
fn check_close(latest_close: f64) -> Result<f64> {
    if latest_close.is_finite() && latest_close > 0.0 {
        Ok(latest_close)
    } else {
        Err(RondaError::InvalidArgument(format!(
            "latest close must be a positive price, got {latest_close}"
        )))
    }
}
