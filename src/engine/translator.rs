//! # engine::translator
//!
//! **Request Translator** — `StockQuery` (ภาษากลาง) → `ProviderRequest`
//! (ภาษาของ Alpha Vantage)
//!
//! | TimeMode   | function               |   | TimeInterval | interval |
//! |------------|------------------------|---|--------------|----------|
//! | Intraday   | `TIME_SERIES_INTRADAY` |   | 1m           | `1min`   |
//! | Daily      | `TIME_SERIES_DAILY`    |   | 5m           | `5min`   |
//! | Weekly     | `TIME_SERIES_WEEKLY`   |   | 15m          | `15min`  |
//! | Monthly    | `TIME_SERIES_MONTHLY`  |   | 30m          | `30min`  |
//! |            |                        |   | 60m          | `60min`  |
//!
//! Unknown inbound codes were already folded into Weekly / 5m by
//! [`crate::models::query`], so the mapping here is total.

use crate::models::{StockQuery, TimeInterval, TimeMode};
use crate::provider::{Function, Interval, ProviderRequest};

pub fn translate(query: &StockQuery) -> ProviderRequest {
    let function = to_function(query.mode);

    ProviderRequest {
        function,
        interval: function.is_intraday().then(|| to_interval(query.interval)),
        symbol:   query.symbol.clone(),
    }
}

pub fn to_function(mode: TimeMode) -> Function {
    match mode {
        TimeMode::Intraday => Function::TimeSeriesIntraday,
        TimeMode::Daily    => Function::TimeSeriesDaily,
        TimeMode::Weekly   => Function::TimeSeriesWeekly,
        TimeMode::Monthly  => Function::TimeSeriesMonthly,
    }
}

pub fn to_interval(interval: TimeInterval) -> Interval {
    match interval {
        TimeInterval::OneMin     => Interval::Min1,
        TimeInterval::FiveMin    => Interval::Min5,
        TimeInterval::FifteenMin => Interval::Min15,
        TimeInterval::ThirtyMin  => Interval::Min30,
        TimeInterval::SixtyMin   => Interval::Min60,
    }
}
