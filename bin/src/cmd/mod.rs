//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod metrics;
pub(crate) mod score;
pub(crate) mod window;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ronda_signals::window::{resolve_date, resolve_now};
use ronda_traits::{SystemClock, TimeWindow};

/// Parse a date string (YYYY-MM-DD).
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date '{s}'"))
}

/// Resolve the lookback window from `as_of`, or from the system clock.
pub(crate) fn resolve_window(as_of: Option<&str>) -> Result<TimeWindow> {
    let window = match as_of {
        Some(date) => resolve_date(parse_date(date)?)?,
        None => resolve_now(&SystemClock)?,
    };
    Ok(window)
}

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_resolve_window_as_of() {
        let window = resolve_window(Some("2024-03-15")).unwrap();
        assert_eq!(window.to_string(), "2023-02-28..2024-02-28");
    }
}
