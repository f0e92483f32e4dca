//! # engine::aggregator
//!
//! **Stock Aggregator** — เรียง RawRecord ตามเวลาแล้วคำนวณ [`Stock`]
//!
//! ```text
//! records (ลำดับตามที่ provider ส่งมา)
//!     │
//!     ├─ stable sort ตาม timestamp (เก่า → ใหม่)
//!     │
//!     └─ เดินรอบเดียว:
//!          previous_close ← close ของแท่งก่อนหน้า (แท่งแรก = 0)
//!          total_volume   += volume
//!          market_cap     += close × volume
//! ```
//!
//! Pure function of its input: no I/O, no shared state.

use crate::error::AppError;
use crate::models::{Point, Stock};
use crate::provider::RawRecord;

/// Sort and normalise a raw series.
///
/// Sums that leave their numeric range are [`AppError::Overflow`].
///
/// An empty series is [`AppError::EmptySeries`] rather than a zero summary:
/// the average volume of nothing is undefined and the caller must not receive
/// a record that looks like real data.
pub fn aggregate(mut records: Vec<RawRecord>) -> Result<Stock, AppError> {
    if records.is_empty() {
        return Err(AppError::EmptySeries);
    }

    // sort_by_key เป็น stable sort — timestamp ซ้ำกันยังคงลำดับเดิม
    records.sort_by_key(|r| r.timestamp);

    let mut points       = Vec::with_capacity(records.len());
    let mut total_volume = 0_i64;
    let mut market_cap   = 0.0_f64;
    let mut prev_close   = 0.0_f64;

    for r in &records {
        let variation = r.high - r.low;
        if !variation.is_finite() {
            return Err(AppError::Overflow("variation"));
        }

        points.push(Point {
            current_value:  r.close,
            bid:            r.high,
            ask:            r.low,
            variation,
            previous_close: prev_close,
            open:           r.open,
            volume:         r.volume,
            time:           r.timestamp.timestamp(),
        });

        total_volume = total_volume
            .checked_add(r.volume)
            .ok_or(AppError::Overflow("total volume"))?;
        market_cap += r.close * r.volume as f64;
        prev_close  = r.close;
    }

    // close × volume ใหญ่เกิน f64 → inf ซึ่ง encode เป็น JSON ไม่ได้
    if !market_cap.is_finite() {
        return Err(AppError::Overflow("market cap"));
    }

    Ok(Stock {
        avg_volume: total_volume / records.len() as i64,
        market_cap,
        points,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn record(ts: DateTime<Utc>, close: f64, volume: i64) -> RawRecord {
        RawRecord { open: close, high: close, low: close, close, volume, timestamp: ts }
    }

    #[test]
    fn test_single_monthly_point() {
        let ts = Utc.with_ymd_and_hms(2020, 11, 6, 0, 0, 0).unwrap();
        let stock = aggregate(vec![record(ts, 114.44, 457)]).unwrap();

        assert_eq!(stock.points, vec![Point {
            current_value:  114.44,
            bid:            114.44,
            ask:            114.44,
            variation:      0.0,
            previous_close: 0.0,
            open:           114.44,
            volume:         457,
            time:           ts.timestamp(),
        }]);
        assert_eq!(stock.market_cap, 114.44 * 457.0);
        assert_eq!(stock.avg_volume, 457);
    }

    #[test]
    fn test_out_of_order_rows_are_sorted() {
        // ส่งมาแบบกลับด้าน: 90 (ใหม่กว่า) มาก่อน 80
        let stock = aggregate(vec![
            record(day(1), 90.0, 110),
            record(day(0), 80.0, 100),
        ])
        .unwrap();

        assert_eq!(stock.points.len(), 2);
        assert_eq!(stock.points[0].current_value, 80.0);
        assert_eq!(stock.points[0].previous_close, 0.0);
        assert_eq!(stock.points[1].current_value, 90.0);
        assert_eq!(stock.points[1].previous_close, 80.0);
        assert_eq!(stock.market_cap, 80.0 * 100.0 + 90.0 * 110.0);
        assert_eq!(stock.avg_volume, 105);
    }

    #[test]
    fn test_variation_is_high_minus_low() {
        let r = RawRecord {
            open: 10.0, high: 12.5, low: 9.0, close: 11.0, volume: 3, timestamp: day(0),
        };
        let stock = aggregate(vec![r]).unwrap();
        let p = &stock.points[0];
        assert_eq!(p.variation, 3.5);
        assert_eq!(p.bid, 12.5);
        assert_eq!(p.ask, 9.0);
        assert_eq!(p.open, 10.0);
    }

    #[test]
    fn test_avg_volume_truncates() {
        let stock = aggregate(vec![
            record(day(0), 1.0, 1),
            record(day(1), 1.0, 2),
        ])
        .unwrap();
        assert_eq!(stock.avg_volume, 1);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let stock = aggregate(vec![
            record(day(0), 1.0, 1),
            record(day(0), 2.0, 1),
            record(day(0), 3.0, 1),
        ])
        .unwrap();
        let closes: Vec<f64> = stock.points.iter().map(|p| p.current_value).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_series_is_explicit_error() {
        assert!(matches!(aggregate(Vec::new()), Err(AppError::EmptySeries)));
    }

    #[test]
    fn test_total_volume_overflow_is_error() {
        let result = aggregate(vec![
            record(day(0), 1.0, i64::MAX),
            record(day(1), 1.0, 1),
        ]);
        assert!(matches!(result, Err(AppError::Overflow("total volume"))));
    }

    #[test]
    fn test_market_cap_overflow_is_error() {
        let result = aggregate(vec![record(day(0), 1e308, 10)]);
        assert!(matches!(result, Err(AppError::Overflow("market cap"))));
    }

    #[test]
    fn test_variation_overflow_is_error() {
        let r = RawRecord {
            open: 0.0, high: f64::MAX, low: -f64::MAX, close: 0.0, volume: 1, timestamp: day(0),
        };
        assert!(matches!(aggregate(vec![r]), Err(AppError::Overflow("variation"))));
    }

    // ── Properties ────────────────────────────────────────────────────────────

    fn arb_series() -> impl Strategy<Value = Vec<RawRecord>> {
        prop::collection::vec((1.0..500.0_f64, 0..1_000_000_i64), 1..40).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (close, volume))| {
                    let close = (close * 100.0).round() / 100.0;
                    RawRecord {
                        open:      close,
                        high:      close + 1.0,
                        low:       close - 1.0,
                        close,
                        volume,
                        timestamp: day(i as i64),
                    }
                })
                .collect()
        })
    }

    proptest! {
        /// Result does not depend on the order the provider sent the rows in.
        #[test]
        fn shuffle_invariant(
            (series, shuffled) in arb_series().prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle()))
        ) {
            let a = aggregate(series).unwrap();
            let b = aggregate(shuffled).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn points_are_chronological_and_chained(series in arb_series()) {
            let n = series.len();
            let stock = aggregate(series).unwrap();

            prop_assert_eq!(stock.points.len(), n);
            prop_assert_eq!(stock.points[0].previous_close, 0.0);
            for w in stock.points.windows(2) {
                prop_assert!(w[0].time < w[1].time);
                prop_assert_eq!(w[1].previous_close, w[0].current_value);
            }
        }

        #[test]
        fn summary_statistics(series in arb_series()) {
            let n = series.len() as i64;
            let total: i64 = series.iter().map(|r| r.volume).sum();
            let stock = aggregate(series).unwrap();

            prop_assert_eq!(stock.avg_volume, total / n);

            let expected: f64 = stock
                .points
                .iter()
                .map(|p| p.current_value * p.volume as f64)
                .sum();
            prop_assert_eq!(stock.market_cap, expected);
        }
    }
}
