//! # Sales Forecast
//!
//! Day-by-day forecasting of store sales and order counts.
//!
//! ## Features
//!
//! - IQR outlier repair on the raw history
//! - Linear trend per metric with 95% prediction intervals
//! - Day-of-week and month seasonality adjustment
//! - A 0-100 confidence score combining fit and data quality
//!
//! Low-data situations never fail: an empty or too-short history yields an
//! empty forecast with a low confidence that the caller can render as
//! "not enough data yet".
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_forecast::{ForecastEngine, ForecastRange, Observation};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history: Vec<Observation> = start
//!     .iter_days()
//!     .take(10)
//!     .map(|d| Observation::on_date(d, 100.0, 10.0))
//!     .collect();
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
//! let outcome = ForecastEngine::new().forecast_from(&history, ForecastRange::SevenDays, today);
//! assert_eq!(outcome.points.len(), 7);
//! assert!(outcome.confidence <= 100);
//! ```

pub mod confidence;
pub mod data;
pub mod engine;
pub mod error;
pub mod synthetic;

// Re-export commonly used types
pub use crate::confidence::ConfidenceScorer;
pub use crate::data::{ForecastOutcome, ForecastPoint, ForecastRange, ForecastSummary, Observation};
pub use crate::engine::{ForecastEngine, MIN_HISTORY};
pub use crate::error::{ForecastError, Result};

/// Forecast `range` days from today with the default engine
pub fn forecast(history: &[Observation], range: ForecastRange) -> ForecastOutcome {
    ForecastEngine::new().forecast(history, range)
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
