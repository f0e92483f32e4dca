//! # provider::parse
//!
//! แปลง CSV body ของ Alpha Vantage เป็น [`RawRecord`]
//!
//! ```text
//! timestamp,open,high,low,close,volume      ← header (ทิ้ง)
//! 2020-11-06,114.4400,114.4400,114.4400,114.4400,457
//! ```
//!
//! Columns are positional.  The first bad row aborts the whole parse: the
//! caller gets either every record or an error, never a prefix.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{Function, ProviderError, RawRecord};

/// Intraday timestamps carry a wall-clock time.
const LAYOUT_INTRADAY: &str = "%Y-%m-%d %H:%M:%S";
/// Daily / weekly / monthly bars are dated only and taken as midnight UTC.
const LAYOUT_STD: &str = "%Y-%m-%d";

const COL_TIMESTAMP: usize = 0;
const COL_OPEN:      usize = 1;
const COL_HIGH:      usize = 2;
const COL_LOW:       usize = 3;
const COL_CLOSE:     usize = 4;
const COL_VOLUME:    usize = 5;

/// Parse a full CSV body for the given function.
///
/// A header-only (or empty) body is success with zero records.
pub fn parse_time_series(function: Function, body: &str) -> Result<Vec<RawRecord>, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(parse_row(function, &row)?);
    }

    Ok(records)
}

fn parse_row(function: Function, row: &csv::StringRecord) -> Result<RawRecord, ProviderError> {
    Ok(RawRecord {
        timestamp: parse_timestamp(function, column(row, COL_TIMESTAMP, "timestamp")?)?,
        open:      parse_price(column(row, COL_OPEN, "open")?, "open")?,
        high:      parse_price(column(row, COL_HIGH, "high")?, "high")?,
        low:       parse_price(column(row, COL_LOW, "low")?, "low")?,
        close:     parse_price(column(row, COL_CLOSE, "close")?, "close")?,
        volume:    parse_volume(column(row, COL_VOLUME, "volume")?)?,
    })
}

fn column<'r>(
    row: &'r csv::StringRecord,
    idx: usize,
    field: &'static str,
) -> Result<&'r str, ProviderError> {
    row.get(idx).ok_or_else(|| ProviderError::Parse {
        field,
        value:  String::new(),
        reason: format!("missing column {idx}"),
    })
}

fn parse_timestamp(function: Function, raw: &str) -> Result<DateTime<Utc>, ProviderError> {
    let parsed = if function.is_intraday() {
        NaiveDateTime::parse_from_str(raw, LAYOUT_INTRADAY)
    } else {
        NaiveDate::parse_from_str(raw, LAYOUT_STD).map(|d| d.and_time(NaiveTime::MIN))
    };

    parsed
        .map(|naive| naive.and_utc())
        .map_err(|e| ProviderError::Parse {
            field:  "timestamp",
            value:  raw.to_string(),
            reason: e.to_string(),
        })
}

/// `f64::from_str` also accepts `NaN` / `inf`; those can't be encoded as JSON
/// numbers, so they are rejected here with the rest of the bad input.
fn parse_price(raw: &str, field: &'static str) -> Result<f64, ProviderError> {
    let price = raw.parse::<f64>().map_err(|e| ProviderError::Parse {
        field,
        value:  raw.to_string(),
        reason: e.to_string(),
    })?;

    if !price.is_finite() {
        return Err(ProviderError::Parse {
            field,
            value:  raw.to_string(),
            reason: "not a finite number".to_string(),
        });
    }

    Ok(price)
}

fn parse_volume(raw: &str) -> Result<i64, ProviderError> {
    raw.parse::<i64>().map_err(|e| ProviderError::Parse {
        field:  "volume",
        value:  raw.to_string(),
        reason: e.to_string(),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "timestamp,open,high,low,close,volume";

    #[test]
    fn test_parse_monthly_row() {
        let body = format!("{HEADER}\n2020-11-06,114.4400,114.4400,114.4400,114.4400,457");
        let records = parse_time_series(Function::TimeSeriesMonthly, &body).unwrap();

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.open, 114.44);
        assert_eq!(r.high, 114.44);
        assert_eq!(r.low, 114.44);
        assert_eq!(r.close, 114.44);
        assert_eq!(r.volume, 457);
        assert_eq!(r.timestamp, Utc.with_ymd_and_hms(2020, 11, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_intraday_row() {
        let body = format!("{HEADER}\r\n2020-11-06 20:00:00,114.4400,115.0,113.5,114.9,457\r\n");
        let records = parse_time_series(Function::TimeSeriesIntraday, &body).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].high, 115.0);
        assert_eq!(records[0].low, 113.5);
        assert_eq!(records[0].timestamp, Utc.with_ymd_and_hms(2020, 11, 6, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_keeps_provider_order() {
        let body = format!(
            "{HEADER}\n2020-11-06,1,1,1,1,1\n2020-10-30,2,2,2,2,2\n2020-11-13,3,3,3,3,3"
        );
        let records = parse_time_series(Function::TimeSeriesWeekly, &body).unwrap();
        let closes: Vec<f64> = records.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_and_header_only_bodies() {
        assert!(parse_time_series(Function::TimeSeriesDaily, "").unwrap().is_empty());
        assert!(parse_time_series(Function::TimeSeriesDaily, HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_bad_price_aborts_whole_parse() {
        let body = format!("{HEADER}\n2020-11-06,1,1,1,1,1\n2020-11-13,1,abc,1,1,1");
        let err = parse_time_series(Function::TimeSeriesWeekly, &body).unwrap_err();

        match err {
            ProviderError::Parse { field, value, .. } => {
                assert_eq!(field, "high");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_prices_are_rejected() {
        let body = format!("{HEADER}\n2020-01-01,NaN,1,1,1,5");
        let err = parse_time_series(Function::TimeSeriesDaily, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "open", .. }));

        let body = format!("{HEADER}\n2020-01-01,1,inf,1,1,5");
        let err = parse_time_series(Function::TimeSeriesDaily, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "high", .. }));

        // ค่าเกินช่วง f64 ก็กลายเป็น inf
        let body = format!("{HEADER}\n2020-01-01,1,1,1,1e400,5");
        let err = parse_time_series(Function::TimeSeriesDaily, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "close", .. }));
    }

    #[test]
    fn test_fractional_volume_is_rejected() {
        let body = format!("{HEADER}\n2020-11-06,1,1,1,1,45.7");
        let err = parse_time_series(Function::TimeSeriesWeekly, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "volume", .. }));
    }

    #[test]
    fn test_timestamp_layout_depends_on_function() {
        // Intraday layout บน monthly → error
        let body = format!("{HEADER}\n2020-11-06 20:00:00,1,1,1,1,1");
        let err = parse_time_series(Function::TimeSeriesMonthly, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "timestamp", .. }));

        // Date-only บน intraday → error
        let body = format!("{HEADER}\n2020-11-06,1,1,1,1,1");
        let err = parse_time_series(Function::TimeSeriesIntraday, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "timestamp", .. }));
    }

    #[test]
    fn test_short_row_is_csv_error() {
        let body = format!("{HEADER}\n2020-11-06,1,1,1,1");
        let err = parse_time_series(Function::TimeSeriesWeekly, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Csv(_)));
    }

    #[test]
    fn test_narrow_table_reports_missing_column() {
        // header กับ data กว้างเท่ากันแต่ไม่ถึง 6 columns
        let body = "timestamp,open\n2020-11-06,1";
        let err = parse_time_series(Function::TimeSeriesWeekly, body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "high", .. }));
    }
}
