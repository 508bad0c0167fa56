//! Error types for the Ronda ratio engine.
//!
//! Every failure a calculator or gateway can produce falls into one of six
//! kinds. [`RondaError`] carries a human-readable context message, while
//! [`ErrorKind`] is the compact, copyable classification stored per metric in
//! batch results.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for Ronda operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RondaError {
    /// The series is too short for the requested calculation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The ticker is unknown or the provider returned no usable payload.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The provider signalled throttling.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Transport-level failure talking to the provider.
    #[error("Network error: {0}")]
    Network(String),

    /// Caller error (bad ticker set, bad concurrency bound, bad input value).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation was cancelled before it started.
    #[error("Cancelled")]
    Cancelled,
}

impl RondaError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientData(_) => ErrorKind::InsufficientData,
            Self::DataUnavailable(_) => ErrorKind::DataUnavailable,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }
}

/// Classification of a [`RondaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Not enough history for the calculation.
    InsufficientData,
    /// Unknown ticker or empty/malformed payload.
    DataUnavailable,
    /// Provider throttling.
    RateLimited,
    /// Transport failure.
    NetworkError,
    /// Caller error.
    InvalidArgument,
    /// Caller-initiated abort or deadline.
    Cancelled,
}

impl ErrorKind {
    /// Transient kinds are retried with backoff inside the gateway adapter.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::RateLimited | Self::NetworkError)
    }

    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::DataUnavailable => "data_unavailable",
            Self::RateLimited => "rate_limited",
            Self::NetworkError => "network_error",
            Self::InvalidArgument => "invalid_argument",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialized Result type for Ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
