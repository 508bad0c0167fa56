//! The metrics produced per ticker.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::RondaError;

/// A scalar score computed for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Latest close over first close of the window, minus one.
    #[serde(rename = "momentum_12_1")]
    Momentum12_1,
    /// Second-latest close over first close of the window, minus one.
    #[serde(rename = "momentum_12_2")]
    Momentum12_2,
    /// Blend of 3, 6 and 12 month price ratios.
    #[serde(rename = "momentum_avg")]
    MomentumAvg,
    /// 1 if the latest close is above its 10-month average, else 0.
    #[serde(rename = "trend_signal")]
    TrendSignal,
    /// Trailing average dividend over latest close.
    #[serde(rename = "dividend_yield")]
    DividendYield,
    /// Trailing average earnings per share over latest close.
    #[serde(rename = "earnings_yield")]
    EarningsYield,
}

impl Metric {
    /// Every metric, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Momentum12_1,
        Self::Momentum12_2,
        Self::MomentumAvg,
        Self::TrendSignal,
        Self::DividendYield,
        Self::EarningsYield,
    ];

    /// Stable snake_case name, used as column and map key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Momentum12_1 => "momentum_12_1",
            Self::Momentum12_2 => "momentum_12_2",
            Self::MomentumAvg => "momentum_avg",
            Self::TrendSignal => "trend_signal",
            Self::DividendYield => "dividend_yield",
            Self::EarningsYield => "earnings_yield",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = RondaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "momentum_12_1" | "mom_12_1" => Ok(Self::Momentum12_1),
            "momentum_12_2" | "mom_12_2" => Ok(Self::Momentum12_2),
            "momentum_avg" | "mom_avg" => Ok(Self::MomentumAvg),
            "trend_signal" | "ma_10" => Ok(Self::TrendSignal),
            "dividend_yield" | "div_p" => Ok(Self::DividendYield),
            "earnings_yield" | "e_p" => Ok(Self::EarningsYield),
            _ => Err(RondaError::InvalidArgument(format!("unknown metric '{s}'"))),
        }
    }
}
