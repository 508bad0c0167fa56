//! [`MarketDataGateway`] implementation backed by the FMP API.

use crate::{
    FmpClient,
    error::FmpError,
    types::{DividendRecord, HistoricalPrice, IncomeStatement, Period, SharesFloat},
};
use async_trait::async_trait;
use ronda_traits::{
    DividendSeries, IncomeStatementRecord, Interval, MarketDataGateway, PriceSeries, Result,
    SharesOutstanding, TimeWindow,
};

/// Convert raw end-of-day rows into a series at the requested spacing.
///
/// Weekly bars are resampled from the daily feed.
pub(crate) fn price_series(
    ticker: &str,
    rows: &[HistoricalPrice],
    interval: Interval,
) -> std::result::Result<PriceSeries, FmpError> {
    let daily: PriceSeries = rows.iter().filter_map(HistoricalPrice::to_bar).collect();
    if daily.is_empty() {
        return Err(FmpError::NoData(ticker.to_uppercase()));
    }
    Ok(match interval {
        Interval::Daily => daily,
        Interval::Weekly => daily.resample_weekly(),
    })
}

pub(crate) fn dividend_series(rows: &[DividendRecord], lookback_count: usize) -> DividendSeries {
    let all = DividendSeries::new(rows.iter().filter_map(DividendRecord::to_dividend).collect());
    DividendSeries::new(all.latest(lookback_count).to_vec())
}

pub(crate) fn income_records(
    ticker: &str,
    rows: &[IncomeStatement],
    periods: usize,
) -> std::result::Result<Vec<IncomeStatementRecord>, FmpError> {
    let mut records: Vec<_> = rows.iter().filter_map(IncomeStatement::to_record).collect();
    if records.is_empty() {
        return Err(FmpError::NoData(ticker.to_uppercase()));
    }
    records.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    records.truncate(periods);
    Ok(records)
}

/// Outstanding shares as reported; a missing field reads as zero and is left
/// for the earnings yield to reject.
pub(crate) const fn shares(float: &SharesFloat) -> SharesOutstanding {
    SharesOutstanding(float.outstanding_shares)
}

#[async_trait]
impl MarketDataGateway for FmpClient {
    async fn price_history(
        &self,
        ticker: &str,
        window: TimeWindow,
        interval: Interval,
    ) -> Result<PriceSeries> {
        let rows = self
            .historical_prices(ticker, window.start(), window.end())
            .await?;
        Ok(price_series(ticker, &rows, interval)?)
    }

    async fn dividend_history(&self, ticker: &str, lookback_count: usize) -> Result<DividendSeries> {
        let rows = self.dividends(ticker).await?;
        Ok(dividend_series(&rows, lookback_count))
    }

    async fn income_statements(
        &self,
        ticker: &str,
        periods: usize,
    ) -> Result<Vec<IncomeStatementRecord>> {
        let limit = u32::try_from(periods).unwrap_or(u32::MAX);
        let rows = self
            .income_statement(ticker, Period::Annual, Some(limit))
            .await?;
        Ok(income_records(ticker, &rows, periods)?)
    }

    async fn shares_outstanding(&self, ticker: &str) -> Result<SharesOutstanding> {
        let float = self.shares_float(ticker).await?;
        Ok(shares(&float))
    }
}
