//! Momentum scores computed from a daily close series.
//!
//! - 12-1 and 12-2: price change from the first bar of the window to the
//!   latest (or second-latest) bar
//! - Average: blend of 3, 6 and 12 month price ratios measured back from the
//!   latest bar using fixed trading-day offsets

mod average;
mod twelve_month;

pub use average::{MomentumAverage, MomentumAverageConfig, momentum_average};
pub use twelve_month::{Momentum, MomentumConfig, momentum};
