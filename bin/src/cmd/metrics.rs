//! Metric listing command implementation.

use super::banner;
use anyhow::Result;
use ronda_signals::{MetricCategory, registry::metrics_by_category};

/// List available metrics, optionally filtered by category.
pub(crate) fn list_metrics(category: Option<&str>, verbose: bool) -> Result<()> {
    banner("Available Metrics");

    let categories = [
        (MetricCategory::Momentum, "Momentum"),
        (MetricCategory::Trend, "Trend"),
        (MetricCategory::Value, "Value"),
    ];

    for (cat, cat_name) in categories {
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!("{cat_name}: {}", cat.description());
        println!("{}", "-".repeat(60));

        for info in metrics_by_category(cat) {
            if verbose {
                let fundamentals = if info.requires_fundamentals {
                    ", fundamentals"
                } else {
                    ""
                };
                println!(
                    "  {:16} - {} ({} bars{fundamentals})",
                    info.metric.as_str(),
                    info.description,
                    info.interval
                );
            } else {
                println!("  {}", info.metric);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed metric descriptions.\n");
    }

    // Show aliases
    println!("Metric aliases:");
    println!("  mom_12_1  -> momentum_12_1");
    println!("  mom_12_2  -> momentum_12_2");
    println!("  mom_avg   -> momentum_avg");
    println!("  ma_10     -> trend_signal");
    println!("  div_p     -> dividend_yield");
    println!("  e_p       -> earnings_yield");
    println!();

    Ok(())
}
