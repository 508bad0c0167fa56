//! Calendar-anchored lookback window.
//!
//! The window always runs from day 28 of the month thirteen months back to
//! day 28 of the previous month. Day 28 exists in every month, so month
//! arithmetic never has to clamp.

use chrono::{DateTime, Datelike, Months, Utc};
use ronda_traits::{Clock, Date, Result, RondaError, TimeWindow};

/// Day of month every window boundary lands on.
pub const ANCHOR_DAY: u32 = 28;

/// Length of the window in calendar months.
pub const WINDOW_MONTHS: u32 = 12;

/// Resolve the window for the instant `now` (UTC calendar date).
///
/// # Errors
///
/// Returns [`RondaError::InvalidArgument`] only if `now` is so close to the
/// minimum representable date that the month arithmetic underflows.
pub fn resolve(now: DateTime<Utc>) -> Result<TimeWindow> {
    resolve_date(now.date_naive())
}

/// Resolve the window for a calendar date.
///
/// ```
/// use ronda_signals::window::resolve_date;
/// use ronda_traits::Date;
///
/// let window = resolve_date(Date::from_ymd_opt(2024, 1, 9).unwrap()).unwrap();
/// assert_eq!(window.end(), Date::from_ymd_opt(2023, 12, 28).unwrap());
/// assert_eq!(window.start(), Date::from_ymd_opt(2022, 12, 28).unwrap());
/// ```
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_date(today: Date) -> Result<TimeWindow> {
    let out_of_range = || RondaError::InvalidArgument(format!("date {today} is out of range"));

    let anchor = today.with_day(ANCHOR_DAY).ok_or_else(out_of_range)?;
    let end = anchor
        .checked_sub_months(Months::new(1))
        .ok_or_else(out_of_range)?;
    let start = end
        .checked_sub_months(Months::new(WINDOW_MONTHS))
        .ok_or_else(out_of_range)?;

    TimeWindow::new(start, end)
}

/// Resolve the window for whatever instant `clock` reports.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_now(clock: &dyn Clock) -> Result<TimeWindow> {
    resolve(clock.now())
}
