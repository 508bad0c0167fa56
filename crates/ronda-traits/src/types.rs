//! Value types consumed by the ratio calculators.
//!
//! All models are plain values: built fresh from a gateway response, read by
//! one calculation, then dropped. Series are kept oldest-first so that index
//! `0` is the earliest observation and index `-1` the latest.

use crate::{Result, RondaError};
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol such as `"AAPL"`.
pub type Ticker = String;

/// The canonical 12-month lookback window, both ends on day 28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: Date,
    end: Date,
}

impl TimeWindow {
    /// Create a window, rejecting `start >= end`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidArgument`] when the bounds are not ordered.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start >= end {
            return Err(RondaError::InvalidArgument(format!(
                "window start {start} must precede end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the window.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` lies within `[start, end]`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Bar spacing requested from the price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    Daily,
    /// One bar per week.
    Weekly,
}

impl Interval {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar timestamp.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PriceBar {
    /// Create a new bar.
    #[must_use]
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Close prices ordered oldest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting bars ascending by date.
    #[must_use]
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { bars }
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    /// Bar at a position; negative positions count from the end (`-1` is the
    /// latest bar).
    #[must_use]
    pub fn bar_at(&self, index: isize) -> Option<&PriceBar> {
        let pos = if index < 0 {
            self.bars.len().checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        self.bars.get(pos)
    }

    /// Close at a position, see [`PriceSeries::bar_at`].
    #[must_use]
    pub fn close_at(&self, index: isize) -> Option<f64> {
        self.bar_at(index).map(|b| b.close)
    }

    /// Earliest close.
    #[must_use]
    pub fn first_close(&self) -> Option<f64> {
        self.bars.first().map(|b| b.close)
    }

    /// Latest close.
    #[must_use]
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Collapse daily bars into one bar per ISO week, dated on that week's
    /// Monday and closing at the week's last close.
    #[must_use]
    pub fn resample_weekly(&self) -> Self {
        let mut weekly: Vec<PriceBar> = Vec::new();
        let mut current_week = None;
        for bar in &self.bars {
            let iso = bar.date.iso_week();
            let week = (iso.year(), iso.week());
            if current_week == Some(week)
                && let Some(last) = weekly.last_mut()
            {
                last.close = bar.close;
                continue;
            }
            current_week = Some(week);
            let monday = Date::from_isoywd_opt(week.0, week.1, Weekday::Mon).unwrap_or(bar.date);
            weekly.push(PriceBar::new(monday, bar.close));
        }
        Self { bars: weekly }
    }
}

impl FromIterator<PriceBar> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceBar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A cash dividend keyed by its ex-date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Ex-dividend date.
    pub ex_date: Date,
    /// Cash amount per share.
    pub amount: f64,
}

/// Dividend history ordered oldest-first. Empty is valid: the ticker pays
/// no dividends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendSeries {
    dividends: Vec<Dividend>,
}

impl DividendSeries {
    /// Build a series, sorting ascending by ex-date.
    #[must_use]
    pub fn new(mut dividends: Vec<Dividend>) -> Self {
        dividends.sort_by_key(|d| d.ex_date);
        Self { dividends }
    }

    /// Number of dividends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Whether no dividends were paid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }

    /// All dividends, oldest first.
    #[must_use]
    pub fn dividends(&self) -> &[Dividend] {
        &self.dividends
    }

    /// The most recent `count` dividends (fewer if the history is shorter).
    #[must_use]
    pub fn latest(&self, count: usize) -> &[Dividend] {
        let skip = self.dividends.len().saturating_sub(count);
        &self.dividends[skip..]
    }
}

/// Net income for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementRecord {
    /// End of the fiscal period.
    pub period_end: Date,
    /// Net income for the period.
    pub net_income: f64,
}

/// Point-in-time share count.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SharesOutstanding(pub f64);

impl SharesOutstanding {
    /// Raw share count.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}
