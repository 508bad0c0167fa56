//! Ten-month moving-average trend signal.
//!
//! Month-end closes are approximated from a weekly series by keeping the bars
//! dated on day 25 or later. The first three such bars are a fixed warm-up
//! skip; the ten after that form the moving average.

use chrono::Datelike;
use ronda_traits::{PriceSeries, Result, RondaError, TimeWindow, stats::mean};
use serde::{Deserialize, Serialize};

/// Configuration for the trend signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSignalConfig {
    /// First day of month treated as month-end (default: 25).
    pub month_end_from_day: u32,
    /// Month-end bars discarded from the start (default: 3).
    pub warmup_skip: usize,
    /// Month-end bars averaged (default: 10).
    pub periods: usize,
}

impl Default for TrendSignalConfig {
    fn default() -> Self {
        Self {
            month_end_from_day: 25,
            warmup_skip: 3,
            periods: 10,
        }
    }
}

/// Trend signal calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendSignal {
    config: TrendSignalConfig,
}

impl TrendSignal {
    /// Create a new calculator with the given configuration.
    #[must_use]
    pub const fn new(config: TrendSignalConfig) -> Self {
        Self { config }
    }

    /// Month-end bars needed: warm-up plus averaging periods.
    #[must_use]
    pub const fn required_month_ends(&self) -> usize {
        self.config.warmup_skip + self.config.periods
    }

    /// The moving average of month-end closes.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InsufficientData`] with fewer than
    /// [`TrendSignal::required_month_ends`] month-end bars in the window.
    pub fn moving_average(&self, series: &PriceSeries, window: TimeWindow) -> Result<f64> {
        let month_ends: Vec<f64> = series
            .bars()
            .iter()
            .filter(|b| window.contains(b.date) && b.date.day() >= self.config.month_end_from_day)
            .map(|b| b.close)
            .collect();

        let required = self.required_month_ends();
        if month_ends.len() < required || self.config.periods == 0 {
            return Err(RondaError::InsufficientData(format!(
                "trend signal needs {required} month-end bars, got {}",
                month_ends.len()
            )));
        }

        let after_warmup = &month_ends[self.config.warmup_skip..];
        let averaged = &after_warmup[after_warmup.len() - self.config.periods..];
        mean(averaged).ok_or_else(|| RondaError::InsufficientData("no month-end bars".to_string()))
    }

    /// `1` if the latest close of `series` is strictly above the moving
    /// average, otherwise `0`.
    ///
    /// # Errors
    ///
    /// See [`TrendSignal::moving_average`].
    pub fn compute(&self, series: &PriceSeries, window: TimeWindow) -> Result<u8> {
        let average = self.moving_average(series, window)?;
        let latest = series
            .latest_close()
            .ok_or_else(|| RondaError::InsufficientData("empty price series".to_string()))?;

        Ok(u8::from(latest > average))
    }
}

/// Trend signal with the default 3-bar warm-up and 10-period average.
///
/// # Errors
///
/// See [`TrendSignal::compute`].
pub fn trend_signal(series: &PriceSeries, window: TimeWindow) -> Result<u8> {
    TrendSignal::default().compute(series, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::resolve_date;
    use approx::assert_relative_eq;
    use chrono::Months;
    use ronda_traits::{Date, PriceBar};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn window() -> TimeWindow {
        TimeWindow::new(d(2023, 4, 28), d(2024, 4, 28)).unwrap()
    }

    /// One bar on the 28th of each of the 13 months the window touches, plus
    /// a mid-month bar closing at 5.0 in between.
    fn series(month_end_close: impl Fn(usize) -> f64) -> PriceSeries {
        let mut bars = Vec::new();
        for i in 0..13 {
            let month_end = d(2023, 4, 28) + Months::new(i);
            bars.push(PriceBar::new(month_end, month_end_close(i as usize)));
            if i < 12 {
                let mid = d(2023, 5, 14) + Months::new(i);
                bars.push(PriceBar::new(mid, 5.0));
            }
        }
        PriceSeries::new(bars)
    }

    #[test]
    fn test_default_config() {
        let signal = TrendSignal::default();
        assert_eq!(signal.required_month_ends(), 13);
    }

    #[test]
    fn test_average_skips_warmup() {
        let s = series(|i| if i < 3 { 1000.0 } else { 10.0 });
        let average = TrendSignal::default().moving_average(&s, window()).unwrap();
        assert_relative_eq!(average, 10.0);
    }

    #[test]
    fn test_average_takes_last_ten_after_warmup() {
        // Two month-end bars per month: the 25th closes at 1, the 28th at 2.
        let mut bars = vec![PriceBar::new(d(2023, 4, 28), 2.0)];
        for i in 1..=12 {
            let anchor = d(2023, 4, 28) + Months::new(i);
            bars.push(PriceBar::new(anchor - chrono::Duration::days(3), 1.0));
            bars.push(PriceBar::new(anchor, 2.0));
        }
        let s = PriceSeries::new(bars);

        let average = TrendSignal::default().moving_average(&s, window()).unwrap();
        assert_relative_eq!(average, 1.5);
        assert_eq!(trend_signal(&s, window()).unwrap(), 1);
    }

    #[test]
    fn test_above_average_is_one() {
        // Average (9 * 100 + 101) / 10 = 100.1, latest 101.
        let s = series(|i| if i == 12 { 101.0 } else { 100.0 });
        assert_eq!(trend_signal(&s, window()).unwrap(), 1);
    }

    #[test]
    fn test_equal_to_average_is_zero() {
        let s = series(|_| 100.0);
        assert_eq!(trend_signal(&s, window()).unwrap(), 0);
    }

    #[test]
    fn test_below_average_is_zero() {
        let s = series(|i| if i == 12 { 90.0 } else { 100.0 });
        assert_eq!(trend_signal(&s, window()).unwrap(), 0);
    }

    #[test]
    fn test_too_few_month_end_bars() {
        let s = series(|_| 1.0);
        let bars: Vec<PriceBar> = s
            .bars()
            .iter()
            .copied()
            .filter(|b| b.date != d(2024, 4, 28))
            .collect();
        let err = trend_signal(&PriceSeries::new(bars), window()).unwrap_err();
        assert!(matches!(err, RondaError::InsufficientData(_)));
    }

    /// Weekday closes rising across `window`, resampled to weekly bars.
    fn resampled(window: TimeWindow) -> PriceSeries {
        let daily: PriceSeries = window
            .start()
            .iter_days()
            .take_while(|date| *date <= window.end())
            .filter(|date| date.weekday().number_from_monday() <= 5)
            .enumerate()
            .map(|(i, date)| PriceBar::new(date, 100.0 + i as f64))
            .collect();
        daily.resample_weekly()
    }

    #[test]
    fn test_resampled_weekly_feed() {
        // Every month of the window has a Monday on or after the 25th.
        let window = resolve_date(d(2024, 6, 15)).unwrap();
        assert_eq!(window.start(), d(2023, 5, 28));
        assert_eq!(trend_signal(&resampled(window), window).unwrap(), 1);

        // April 2023 and January 2024 have none, leaving 11 month-end bars.
        let window = resolve_date(d(2024, 2, 10)).unwrap();
        assert_eq!(window.start(), d(2023, 1, 28));
        assert!(matches!(
            trend_signal(&resampled(window), window),
            Err(RondaError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_bars_outside_window_ignored() {
        let narrow = TimeWindow::new(d(2024, 1, 28), d(2024, 4, 28)).unwrap();
        assert!(matches!(
            trend_signal(&series(|_| 100.0), narrow),
            Err(RondaError::InsufficientData(_))
        ));
    }
}
