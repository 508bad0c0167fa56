//! Ronda CLI binary.
//!
//! Provides command-line interface for the Ronda ratio engine.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Momentum, trend and yield ratios for ranking equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable table
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the lookback window for a date
    Window {
        /// Date to resolve from (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// List available metrics
    Metrics {
        /// Filter by category (momentum, trend, value)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Score tickers and rank them by one metric
    Score {
        /// Ticker symbols
        #[arg(value_delimiter = ',', required = true)]
        tickers: Vec<String>,

        /// Tickers scored at once
        #[arg(short = 'j', long, default_value = "4")]
        concurrency: usize,

        /// Stop starting new tickers after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,

        /// Retries for rate-limited or failed requests
        #[arg(long, default_value = "3")]
        retries: u32,

        /// Date to resolve the window from (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Metric to rank by
        #[arg(short, long, default_value = "momentum_12_2")]
        sort_by: String,

        /// Rank largest first
        #[arg(long)]
        desc: bool,

        /// Rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Append cross-sectional z-scores
        #[arg(long)]
        zscores: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Window { as_of } => {
            cmd::window::show_window(as_of.as_deref())?;
        }
        Commands::Metrics { category } => {
            cmd::metrics::list_metrics(category.as_deref(), cli.verbose)?;
        }
        Commands::Score {
            tickers,
            concurrency,
            deadline_secs,
            retries,
            as_of,
            sort_by,
            desc,
            limit,
            zscores,
            format,
        } => {
            let options = cmd::score::ScoreOptions {
                concurrency,
                deadline_secs,
                retries,
                as_of,
                sort_by,
                descending: desc,
                limit,
                z_scores: zscores,
                format,
            };
            cmd::score::score_tickers(&tickers, options).await?;
        }
    }

    Ok(())
}
