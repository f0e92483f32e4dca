//! # models::stock
//!
//! Defines [`Stock`], the normalised analytics record that the service
//! serialises, encrypts and hands back to the caller.
//!
//! Field names are part of the wire contract: the encrypted body is plain
//! `serde_json` of these structs, so renaming a field is a breaking change for
//! every consumer that decrypts it.

use serde::{Deserialize, Serialize};

/// One normalised observation of the series.
///
/// Built from a provider record plus the close of the record before it in
/// time (see [`crate::engine::aggregator`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Close price of the period.
    pub current_value: f64,

    /// Highest price of the period.
    pub bid: f64,

    /// Lowest price of the period.
    pub ask: f64,

    /// `bid - ask` (high − low).
    pub variation: f64,

    /// Close of the previous period, `0.0` for the oldest point.
    pub previous_close: f64,

    pub open: f64,

    pub volume: i64,

    /// Period start as Unix epoch seconds (UTC).
    pub time: i64,
}

/// สรุปผล Time Series ทั้งชุด — points เรียงจากเก่าไปใหม่เสมอ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub points: Vec<Point>,

    /// Σ close × volume ของทุก point (ไม่ใช่ market cap จริง)
    pub market_cap: f64,

    /// Σ volume / จำนวน point (หารแบบตัดเศษ)
    pub avg_volume: i64,
}
