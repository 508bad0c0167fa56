//! Data types for FMP API responses.

use chrono::NaiveDate;
use ronda_traits::{Dividend, IncomeStatementRecord, PriceBar};
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (FY, Q1, ...).
    #[serde(default)]
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Net income.
    #[serde(default)]
    pub net_income: f64,
    /// Earnings per share (basic).
    #[serde(default)]
    pub eps: f64,
    /// Weighted average shares outstanding.
    #[serde(default)]
    pub weighted_average_shs_out: f64,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Convert to the engine's record, dropping rows with unparseable dates.
    #[must_use]
    pub fn to_record(&self) -> Option<IncomeStatementRecord> {
        Some(IncomeStatementRecord {
            period_end: self.parsed_date()?,
            net_income: self.net_income,
        })
    }
}

/// Historical end-of-day price from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Convert to a close-price bar, dropping rows with unparseable dates.
    #[must_use]
    pub fn to_bar(&self) -> Option<PriceBar> {
        Some(PriceBar::new(self.parsed_date()?, self.close))
    }
}

/// Historical dividend payment from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRecord {
    /// Ticker symbol.
    pub symbol: String,
    /// Ex-dividend date.
    pub date: String,
    /// Split-adjusted dividend.
    #[serde(default)]
    pub adj_dividend: f64,
    /// Dividend as declared.
    #[serde(default)]
    pub dividend: f64,
}

impl DividendRecord {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Convert to the engine's dividend, preferring the split-adjusted amount.
    #[must_use]
    pub fn to_dividend(&self) -> Option<Dividend> {
        let amount = if self.adj_dividend > 0.0 {
            self.adj_dividend
        } else {
            self.dividend
        };
        Some(Dividend {
            ex_date: self.parsed_date()?,
            amount,
        })
    }
}

/// Share float data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesFloat {
    /// Ticker symbol.
    pub symbol: String,
    /// As-of date.
    #[serde(default)]
    pub date: String,
    /// Shares available for trading.
    #[serde(default)]
    pub float_shares: f64,
    /// Total shares outstanding.
    #[serde(default)]
    pub outstanding_shares: f64,
}
