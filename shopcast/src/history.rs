//! CSV history loaders
//!
//! Two layouts are read, both with a header row:
//! - daily metrics: `timestamp,sales,orders`
//! - price observations: `price,quantity,timestamp`
//!
//! Timestamps are RFC 3339 or a bare `YYYY-MM-DD` date (midnight UTC).
//! Rows are returned in file order; the engines sort for themselves.

use crate::{Result, ShopcastError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use price_optimizer::SalesObservation;
use sales_forecast::Observation;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MetricsRecord {
    timestamp: String,
    sales: f64,
    orders: f64,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    price: f64,
    quantity: u32,
    timestamp: String,
}

/// Parse an RFC 3339 timestamp or a plain calendar date
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// Load a daily metrics history from a CSV file
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let rows = read_metrics(reader)?;
    tracing::debug!(path = %path.as_ref().display(), rows = rows.len(), "loaded metrics history");
    Ok(rows)
}

/// Load a price/quantity history from a CSV file
pub fn load_price_history<P: AsRef<Path>>(path: P) -> Result<Vec<SalesObservation>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let rows = read_price_history(reader)?;
    tracing::debug!(path = %path.as_ref().display(), rows = rows.len(), "loaded price history");
    Ok(rows)
}

/// Read daily metrics from any CSV source
pub fn read_metrics<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Observation>> {
    let mut rows = Vec::new();
    for record in reader.deserialize::<MetricsRecord>() {
        let record = record?;
        let timestamp = timestamp_or_err(&record.timestamp, rows.len())?;
        if !record.sales.is_finite() || !record.orders.is_finite() {
            return Err(ShopcastError::Record {
                line: data_line(rows.len()),
                message: "sales and orders must be finite".to_string(),
            });
        }
        rows.push(Observation::new(timestamp, record.sales, record.orders));
    }
    Ok(rows)
}

/// Read price observations from any CSV source
pub fn read_price_history<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<SalesObservation>> {
    let mut rows = Vec::new();
    for record in reader.deserialize::<PriceRecord>() {
        let record = record?;
        let timestamp = timestamp_or_err(&record.timestamp, rows.len())?;
        if !record.price.is_finite() || record.price <= 0.0 {
            return Err(ShopcastError::Record {
                line: data_line(rows.len()),
                message: format!("price must be positive, got {}", record.price),
            });
        }
        rows.push(SalesObservation::new(record.price, record.quantity, timestamp));
    }
    Ok(rows)
}

fn timestamp_or_err(raw: &str, index: usize) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| ShopcastError::Record {
        line: data_line(index),
        message: format!("unrecognised timestamp '{}'", raw),
    })
}

/// 1-based file line of the `index`th data row, after the header
fn data_line(index: usize) -> u64 {
    index as u64 + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let date = parse_timestamp("2024-03-05").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 5));
        assert_eq!(date.hour(), 0);

        let ts = parse_timestamp("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);

        assert!(parse_timestamp("05/03/2024").is_none());
    }

    #[test]
    fn test_read_metrics() {
        let rows = read_metrics(reader(
            "timestamp,sales,orders\n2024-01-01, 120.5, 4\n2024-01-02T00:00:00Z,99,3\n",
        ))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sales, 120.5);
        assert_eq!(rows[1].orders, 3.0);
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let err = read_metrics(reader(
            "timestamp,sales,orders\n2024-01-01,1,1\nyesterday,2,2\n",
        ))
        .unwrap_err();
        match err {
            ShopcastError::Record { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_price_history() {
        let rows = read_price_history(reader(
            "price,quantity,timestamp\n19.99,12,2024-02-01\n24.99,8,2024-02-02\n",
        ))
        .unwrap();
        assert_eq!(rows[1].price, 24.99);
        assert_eq!(rows[1].quantity, 8);
    }

    #[rstest]
    #[case::bad_timestamp("19.99,5,last tuesday", true)]
    #[case::zero_price("0,5,2024-02-01", true)]
    #[case::negative_price("-4.50,5,2024-02-01", true)]
    #[case::negative_quantity("19.99,-1,2024-02-01", false)]
    #[case::missing_column("19.99,5", false)]
    fn test_bad_price_row_rejected(#[case] row: &str, #[case] record_error: bool) {
        let data = format!("price,quantity,timestamp\n24.99,8,2024-01-31\n{}\n", row);
        let result = read_price_history(reader(&data));

        if record_error {
            assert!(matches!(result, Err(ShopcastError::Record { line: 3, .. })));
        } else {
            assert!(matches!(result, Err(ShopcastError::Csv(_))));
        }
    }
}
