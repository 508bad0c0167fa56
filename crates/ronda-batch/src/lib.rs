//! Batch scoring for the Ronda ratio engine.
//!
//! [`BatchScorer`] fans a ticker set out over a bounded pool of tokio tasks.
//! Each ticker fetches its feeds once and runs every calculator, capturing
//! per-metric failures in its [`RatioResult`]. Transient gateway failures are
//! retried by a [`RetryingGateway`] that stops retrying once the batch is
//! cancelled.
//!
//! # Example
//!
//! ```ignore
//! use ronda_batch::{BatchConfig, BatchScorer, RetryConfig};
//! use std::sync::Arc;
//!
//! let config = BatchConfig {
//!     retry: RetryConfig::exponential(2),
//!     ..BatchConfig::default()
//! };
//! let scorer = BatchScorer::new(Arc::new(client), config);
//! let results = scorer.score_tickers(&tickers, window, 4).await?;
//! ```

#![warn(missing_docs)]

mod cancel;
pub mod ranking;
mod result;
mod retry;
mod scorer;

pub use cancel::Cancellation;
pub use ranking::{RankSpec, rank, to_frame};
pub use result::RatioResult;
pub use retry::{Backoff, RetryConfig, RetryingGateway};
pub use scorer::{BatchConfig, BatchScorer};
