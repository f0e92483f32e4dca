//! # provider
//!
//! Data-acquisition side of the pipeline: the [`TimeSeriesSource`] capability
//! plus its Alpha Vantage implementation.
//!
//! Nothing in here aggregates.  A source hands back [`RawRecord`]s in whatever
//! order the upstream produced them; sorting belongs to
//! [`crate::engine::aggregator`].

pub mod alphavantage;
pub mod parse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{TimeInterval, TimeMode};

pub use alphavantage::AlphaVantageClient;

// ─── Provider vocabulary ──────────────────────────────────────────────────────

/// Alpha Vantage `function` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    TimeSeriesIntraday,
    TimeSeriesDaily,
    TimeSeriesWeekly,
    TimeSeriesMonthly,
}

impl Function {
    pub fn as_str(self) -> &'static str {
        match self {
            Function::TimeSeriesIntraday => "TIME_SERIES_INTRADAY",
            Function::TimeSeriesDaily    => "TIME_SERIES_DAILY",
            Function::TimeSeriesWeekly   => "TIME_SERIES_WEEKLY",
            Function::TimeSeriesMonthly  => "TIME_SERIES_MONTHLY",
        }
    }

    pub fn is_intraday(self) -> bool {
        self == Function::TimeSeriesIntraday
    }
}

impl From<Function> for TimeMode {
    fn from(function: Function) -> Self {
        match function {
            Function::TimeSeriesIntraday => TimeMode::Intraday,
            Function::TimeSeriesDaily    => TimeMode::Daily,
            Function::TimeSeriesWeekly   => TimeMode::Weekly,
            Function::TimeSeriesMonthly  => TimeMode::Monthly,
        }
    }
}

/// Alpha Vantage `interval` parameter (intraday only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Min1  => "1min",
            Interval::Min5  => "5min",
            Interval::Min15 => "15min",
            Interval::Min30 => "30min",
            Interval::Min60 => "60min",
        }
    }
}

impl From<Interval> for TimeInterval {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::Min1  => TimeInterval::OneMin,
            Interval::Min5  => TimeInterval::FiveMin,
            Interval::Min15 => TimeInterval::FifteenMin,
            Interval::Min30 => TimeInterval::ThirtyMin,
            Interval::Min60 => TimeInterval::SixtyMin,
        }
    }
}

/// Request ในภาษาของ provider — `interval` เป็น `Some` เฉพาะ Intraday เท่านั้น
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub function: Function,
    pub interval: Option<Interval>,
    pub symbol:   String,
}

// ─── Records ──────────────────────────────────────────────────────────────────

/// One CSV data row as the provider sent it.
///
/// The sequence a source returns is NOT guaranteed to be chronological.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    pub open:      f64,
    pub high:      f64,
    pub low:       f64,
    pub close:     f64,
    pub volume:    i64,
    pub timestamp: DateTime<Utc>,
}

// ─── Error ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The GET could not be executed (DNS, connect, timeout, cancelled).
    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-200.  `dump` is for the log only.
    #[error("server response error [{status}]\n{dump}")]
    ServerResponse { status: u16, dump: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("error reading csv row: {0}")]
    Csv(#[from] csv::Error),

    /// A column of a data row could not be parsed.
    #[error("failed to parse {field} field {value:?}: {reason}")]
    Parse {
        field:  &'static str,
        value:  String,
        reason: String,
    },
}

// ─── Capability ───────────────────────────────────────────────────────────────

/// Anything that can produce a raw time series for a [`ProviderRequest`].
///
/// Injected into [`crate::state::AppState`] as `Arc<dyn TimeSeriesSource>` so
/// tests can swap in a canned source.
#[async_trait]
pub trait TimeSeriesSource: Send + Sync {
    async fn fetch_time_series(
        &self,
        request: &ProviderRequest,
    ) -> Result<Vec<RawRecord>, ProviderError>;
}
