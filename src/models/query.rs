//! # models::query
//!
//! Provider-agnostic description of what the caller asked for.
//!
//! Inbound codes are plain integers (`?mode=3&interval=58`). Unknown codes are
//! never rejected: mode falls back to [`TimeMode::Weekly`] and interval to
//! [`TimeInterval::FiveMin`].  A value that is not an integer at all reads as
//! code `0`, so `?mode=abc` is an intraday request.

use std::num::IntErrorKind;

// ─── TimeMode ─────────────────────────────────────────────────────────────────

/// Sampling mode of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeMode {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl TimeMode {
    #[cfg(test)]
    pub const ALL: [TimeMode; 4] = [
        TimeMode::Intraday,
        TimeMode::Daily,
        TimeMode::Weekly,
        TimeMode::Monthly,
    ];

    /// Mode ที่ใช้เมื่อ Request ไม่ได้ส่ง `mode` มา
    pub const DEFAULT: TimeMode = TimeMode::Weekly;

    /// Mode สำหรับ code ที่ไม่รู้จัก
    pub const FALLBACK: TimeMode = TimeMode::Weekly;

    /// แปลง code จาก query string — code ที่ไม่รู้จักจะได้ Weekly
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => TimeMode::Intraday,
            1 => TimeMode::Daily,
            2 => TimeMode::Weekly,
            3 => TimeMode::Monthly,
            _ => Self::FALLBACK,
        }
    }

    #[cfg(test)]
    pub fn code(self) -> i64 {
        match self {
            TimeMode::Intraday => 0,
            TimeMode::Daily    => 1,
            TimeMode::Weekly   => 2,
            TimeMode::Monthly  => 3,
        }
    }
}

// ─── TimeInterval ─────────────────────────────────────────────────────────────

/// Bar width for intraday series. Ignored for every other mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInterval {
    OneMin,
    FiveMin,
    FifteenMin,
    ThirtyMin,
    SixtyMin,
}

impl TimeInterval {
    #[cfg(test)]
    pub const ALL: [TimeInterval; 5] = [
        TimeInterval::OneMin,
        TimeInterval::FiveMin,
        TimeInterval::FifteenMin,
        TimeInterval::ThirtyMin,
        TimeInterval::SixtyMin,
    ];

    /// Interval ที่ใช้เมื่อ Request ไม่ได้ส่ง `interval` มา
    pub const DEFAULT: TimeInterval = TimeInterval::SixtyMin;

    pub const FALLBACK: TimeInterval = TimeInterval::FiveMin;

    /// Codes start at 54 and are kept for compatibility with existing clients.
    pub fn from_code(code: i64) -> Self {
        match code {
            54 => TimeInterval::OneMin,
            55 => TimeInterval::FiveMin,
            56 => TimeInterval::FifteenMin,
            57 => TimeInterval::ThirtyMin,
            58 => TimeInterval::SixtyMin,
            _  => Self::FALLBACK,
        }
    }

    #[cfg(test)]
    pub fn code(self) -> i64 {
        match self {
            TimeInterval::OneMin     => 54,
            TimeInterval::FiveMin    => 55,
            TimeInterval::FifteenMin => 56,
            TimeInterval::ThirtyMin  => 57,
            TimeInterval::SixtyMin   => 58,
        }
    }
}

// ─── StockQuery ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    pub mode:     TimeMode,
    pub interval: TimeInterval,
    /// ส่งต่อไปตามที่ได้รับ — symbol ว่างจะไป fail ที่ฝั่ง provider
    pub symbol:   String,
}

impl StockQuery {
    /// Build a query from raw query-string values.
    ///
    /// Missing or empty values take the defaults.  Anything else goes through
    /// [`parse_code`] first.
    pub fn from_params(mode: Option<&str>, interval: Option<&str>, symbol: Option<&str>) -> Self {
        let mode = match mode.filter(|m| !m.is_empty()) {
            Some(raw) => TimeMode::from_code(parse_code(raw)),
            None => TimeMode::DEFAULT,
        };

        let interval = match interval.filter(|i| !i.is_empty()) {
            Some(raw) => TimeInterval::from_code(parse_code(raw)),
            None => TimeInterval::DEFAULT,
        };

        Self {
            mode,
            interval,
            symbol: symbol.unwrap_or_default().to_string(),
        }
    }
}

/// Integer code of a query value.
///
/// Not-a-number reads as `0`; out-of-range numbers clamp to the `i64` bounds
/// (and so land on the fallback).  No whitespace trimming: `" 3"` is not a
/// number.
fn parse_code(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(code) => code,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}
