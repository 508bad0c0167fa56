//! Ratio calculators for the Ronda engine.
//!
//! Every calculator is a pure function over immutable inputs:
//! - [`window`]: the 28th-anchored 12-month lookback window
//! - [`momentum`]: 12-1, 12-2 and blended multi-horizon momentum
//! - [`trend`]: 10-month moving-average trend signal from weekly bars
//! - [`value`]: dividend yield and earnings yield
//!
//! # Example
//!
//! ```ignore
//! use ronda_signals::{momentum::momentum, window::resolve_now};
//! use ronda_traits::SystemClock;
//!
//! let window = resolve_now(&SystemClock)?;
//! let score = momentum(&daily_series, -1)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod registry;
pub mod trend;
pub mod value;
pub mod window;

// Re-export key types
pub use registry::{MetricCategory, MetricInfo};
