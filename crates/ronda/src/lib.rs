#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Ratio engine for ranking equities by momentum, trend and yield.
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> ronda::Result<()> {
//! let window = ronda::signals::window::resolve_now(&SystemClock)?;
//!
//! let client = ronda::fmp::FmpClient::from_env().map_err(RondaError::from)?;
//! let scorer = BatchScorer::new(Arc::new(client), BatchConfig::default());
//!
//! let tickers = ["AAPL", "MSFT"].into_iter().map(String::from).collect();
//! let results = scorer.score(&tickers, window).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Value types, errors, the metric catalogue and the gateway contract
//! - [`signals`] - Window resolver and the pure ratio calculators
//! - [`batch`] - Concurrent batch scoring, retry and ranking
//! - [`fmp`] - Financial Modeling Prep gateway
//!
//! ## Metrics
//!
//! | Metric | Input | Result |
//! |--------|-------|--------|
//! | `momentum_12_1` | daily closes | `close[-1] / close[0] - 1` |
//! | `momentum_12_2` | daily closes | `close[-2] / close[0] - 1` |
//! | `momentum_avg` | daily closes | mean of 3, 6 and 12 month price ratios |
//! | `trend_signal` | weekly closes | 1 if above the 10-month average |
//! | `dividend_yield` | dividends, latest close | mean of last 16 dividends / close |
//! | `earnings_yield` | income, shares, latest close | mean EPS of last 4 years / close |

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Value types, errors and the gateway contract.
pub mod traits {
    pub use ronda_traits::*;
}

// Re-export core types at top level for convenience
pub use ronda_traits::{
    Clock, ErrorKind, MarketDataGateway, Metric, PriceSeries, Result, RondaError, TimeWindow,
};

// ============================================================================
// Calculators
// ============================================================================

/// Window resolver and ratio calculators.
///
/// Every calculator is a pure function over immutable inputs, so calling one
/// twice with the same inputs yields the same rounded output.
///
/// # Example
///
/// ```ignore
/// use ronda::signals::momentum::momentum;
///
/// let twelve_one = momentum(&daily, -1)?;
/// let twelve_two = momentum(&daily, -2)?;
/// ```
pub mod signals {
    pub use ronda_signals::*;
}

// ============================================================================
// Batch Scoring
// ============================================================================

/// Concurrent batch scoring, retry and ranking.
pub mod batch {
    pub use ronda_batch::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) gateway.
///
/// ## Setup
///
/// 1. Get an API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use ronda_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use ronda_batch::{
        BatchConfig, BatchScorer, Cancellation, RankSpec, RatioResult, RetryConfig,
        RetryingGateway,
    };
    pub use ronda_traits::{
        Clock, ErrorKind, FixedClock, Interval, MarketDataGateway, Metric, PriceSeries, Result,
        RondaError, SystemClock, TimeWindow,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_gateway(_gateway: &dyn MarketDataGateway) {}
        fn _accept_clock(_clock: &dyn Clock) {}

        let _result: Result<()> = Ok(());
        let error = RondaError::Cancelled;
        assert_eq!(error.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_window_through_prelude() {
        use prelude::*;

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
        let window = signals::window::resolve_now(&clock).unwrap();
        assert_eq!(window.to_string(), "2022-12-28..2023-12-28");
    }
}
