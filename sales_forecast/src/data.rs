//! Input and output records for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One day of historical store metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// When the metrics were recorded
    pub timestamp: DateTime<Utc>,
    /// Sales amount for the day
    pub sales: f64,
    /// Number of orders for the day
    pub orders: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, sales: f64, orders: f64) -> Self {
        Self {
            timestamp,
            sales,
            orders,
        }
    }

    /// Observation stamped at midnight UTC of `date`
    pub fn on_date(date: NaiveDate, sales: f64, orders: f64) -> Self {
        Self::new(start_of_day(date), sales, orders)
    }
}

/// Midnight UTC at the start of `date`
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// How far ahead to forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForecastRange {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "14d")]
    FourteenDays,
    #[default]
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
}

impl ForecastRange {
    /// Number of days generated for this range
    pub fn days(self) -> usize {
        match self {
            ForecastRange::SevenDays => 7,
            ForecastRange::FourteenDays => 14,
            ForecastRange::OneMonth => 30,
            ForecastRange::ThreeMonths => 90,
            ForecastRange::SixMonths => 180,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ForecastRange::SevenDays => "7d",
            ForecastRange::FourteenDays => "14d",
            ForecastRange::OneMonth => "1month",
            ForecastRange::ThreeMonths => "3months",
            ForecastRange::SixMonths => "6months",
        }
    }
}

impl fmt::Display for ForecastRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastRange {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(ForecastRange::SevenDays),
            "14d" => Ok(ForecastRange::FourteenDays),
            "1month" => Ok(ForecastRange::OneMonth),
            "3months" => Ok(ForecastRange::ThreeMonths),
            "6months" => Ok(ForecastRange::SixMonths),
            _ => Err(ForecastError::InvalidParameter(format!(
                "Unsupported forecast range: {}",
                s
            ))),
        }
    }
}

/// One forecast day with 95% bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub sales: u64,
    pub orders: u64,
    pub sales_lower: u64,
    pub sales_upper: u64,
    pub orders_lower: u64,
    pub orders_upper: u64,
    pub is_forecast: bool,
}

/// Forecast points together with an overall confidence score
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub points: Vec<ForecastPoint>,
    /// Confidence in `[0, 100]`
    pub confidence: u8,
}

impl ForecastOutcome {
    /// No points, only a confidence score
    pub fn empty(confidence: u8) -> Self {
        Self {
            points: Vec::new(),
            confidence: confidence.min(100),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Totals and daily averages across the forecast horizon
    pub fn summary(&self) -> ForecastSummary {
        let days = self.points.len();
        let total_sales: u64 = self.points.iter().map(|p| p.sales).sum();
        let total_orders: u64 = self.points.iter().map(|p| p.orders).sum();
        let average = |total: u64| {
            if days == 0 {
                0.0
            } else {
                total as f64 / days as f64
            }
        };

        ForecastSummary {
            days,
            total_sales,
            total_orders,
            average_daily_sales: average(total_sales),
            average_daily_orders: average(total_orders),
        }
    }
}

/// Horizon totals for dashboard tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub days: usize,
    pub total_sales: u64,
    pub total_orders: u64,
    pub average_daily_sales: f64,
    pub average_daily_orders: f64,
}
