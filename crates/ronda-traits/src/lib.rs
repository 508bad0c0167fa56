#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core definitions for the Ronda ratio engine.
//!
//! This crate holds the value types the calculators consume, the error
//! taxonomy shared by every layer, and the [`MarketDataGateway`] contract
//! that data adapters implement.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod clock;
pub mod error;
pub mod gateway;
pub mod metric;
pub mod stats;
pub mod types;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ErrorKind, Result, RondaError};
pub use gateway::MarketDataGateway;
pub use metric::Metric;
pub use types::{
    Date, Dividend, DividendSeries, IncomeStatementRecord, Interval, PriceBar, PriceSeries,
    SharesOutstanding, Ticker, TimeWindow,
};
