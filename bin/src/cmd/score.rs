//! Score command implementation.

use super::{banner, resolve_window};
use crate::Format;
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use ronda_batch::{
    BatchConfig, BatchScorer, RankSpec, RatioResult, RetryConfig, rank,
    ranking::{TICKER_COLUMN, ZSCORE_SUFFIX},
};
use ronda_fmp::FmpClient;
use ronda_traits::{Metric, Ticker, TimeWindow};
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
    time::Duration,
};

/// Flags of the `score` command.
#[derive(Debug)]
pub(crate) struct ScoreOptions {
    pub(crate) concurrency: usize,
    pub(crate) deadline_secs: Option<u64>,
    pub(crate) retries: u32,
    pub(crate) as_of: Option<String>,
    pub(crate) sort_by: String,
    pub(crate) descending: bool,
    pub(crate) limit: usize,
    pub(crate) z_scores: bool,
    pub(crate) format: Format,
}

#[derive(Serialize)]
struct Report<'a> {
    window: TimeWindow,
    sort_by: Metric,
    descending: bool,
    results: Vec<&'a RatioResult>,
}

/// Normalise user input into a ticker set.
fn parse_tickers(raw: &[String]) -> BTreeSet<Ticker> {
    raw.iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Score tickers against FMP and print them ranked.
pub(crate) async fn score_tickers(raw_tickers: &[String], options: ScoreOptions) -> Result<()> {
    let sort_by: Metric = options.sort_by.parse()?;
    let window = resolve_window(options.as_of.as_deref())?;
    let tickers = parse_tickers(raw_tickers);
    tracing::debug!(%window, tickers = tickers.len(), %sort_by, "score request");

    let client = FmpClient::from_env().context("Failed to configure FMP client")?;
    let config = BatchConfig {
        concurrency_limit: options.concurrency,
        deadline: options.deadline_secs.map(Duration::from_secs),
        retry: RetryConfig::exponential(options.retries),
        ..BatchConfig::default()
    };
    let scorer = BatchScorer::new(Arc::new(client), config);

    let results = scorer.score(&tickers, window).await?;

    let spec = RankSpec {
        sort_by,
        descending: options.descending,
        limit: Some(options.limit),
        z_scores: options.z_scores,
    };
    let ranked = rank(&results, &spec)?;

    match options.format {
        Format::Json => print_json(&results, &ranked, window, &spec)?,
        Format::Text => print_table(&results, &ranked, window, &spec)?,
    }

    Ok(())
}

fn ranked_tickers(frame: &DataFrame) -> Result<Vec<String>> {
    Ok(frame
        .column(TICKER_COLUMN)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}

fn print_json(
    results: &BTreeMap<Ticker, RatioResult>,
    ranked: &DataFrame,
    window: TimeWindow,
    spec: &RankSpec,
) -> Result<()> {
    let report = Report {
        window,
        sort_by: spec.sort_by,
        descending: spec.descending,
        results: ranked_tickers(ranked)?
            .iter()
            .filter_map(|t| results.get(t))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_table(
    results: &BTreeMap<Ticker, RatioResult>,
    ranked: &DataFrame,
    window: TimeWindow,
    spec: &RankSpec,
) -> Result<()> {
    banner("Ratio Scores");

    println!("Window:  {window}");
    println!(
        "Sort:    {} ({})",
        spec.sort_by,
        if spec.descending { "descending" } else { "ascending" }
    );
    println!();

    print!("{:<8}", "Ticker");
    for metric in Metric::ALL {
        print!(" {:>14}", metric.as_str());
    }
    if spec.z_scores {
        print!(" {:>14}", format!("{}{ZSCORE_SUFFIX}", spec.sort_by));
    }
    println!();
    println!("{}", "─".repeat(8 + 15 * (Metric::ALL.len() + usize::from(spec.z_scores))));

    let z_column = if spec.z_scores {
        let name = format!("{}{ZSCORE_SUFFIX}", spec.sort_by);
        Some(ranked.column(&name)?.as_materialized_series().f64()?.clone())
    } else {
        None
    };

    for (row, ticker) in ranked_tickers(ranked)?.iter().enumerate() {
        let Some(result) = results.get(ticker) else {
            continue;
        };
        print!("{ticker:<8}");
        for metric in Metric::ALL {
            match result.value(metric) {
                Some(value) => print!(" {value:>14.3}"),
                None => print!(" {:>14}", "-"),
            }
        }
        if let Some(z) = &z_column {
            match z.get(row) {
                Some(value) => print!(" {value:>14.3}"),
                None => print!(" {:>14}", "-"),
            }
        }
        println!();
    }
    println!();

    let failures: Vec<_> = results.values().filter(|r| !r.is_complete()).collect();
    if !failures.is_empty() {
        println!("Failed metrics:");
        for result in failures {
            let errors: Vec<String> = result
                .errors
                .iter()
                .map(|(metric, kind)| format!("{metric}={kind}"))
                .collect();
            println!("  {:<8} {}", result.ticker, errors.join(", "));
        }
        println!();
    }

    Ok(())
}
