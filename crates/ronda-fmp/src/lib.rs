//! Financial Modeling Prep (FMP) market data gateway for Ronda.
//!
//! This crate provides a throttled client for the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) stable API
//! and implements [`ronda_traits::MarketDataGateway`] on top of it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_fmp::FmpClient;
//! use ronda_traits::{Interval, MarketDataGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     let prices = client.price_history("AAPL", window, Interval::Daily).await?;
//!     let income = client.income_statements("AAPL", 4).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! FMP_REQUESTS_PER_MINUTE=300
//! ```

mod client;
mod config;
mod error;
mod gateway;
mod types;

pub use client::FmpClient;
pub use config::{DEFAULT_REQUESTS_PER_MINUTE, DEFAULT_TIMEOUT, FMP_BASE_URL, FmpConfig};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
