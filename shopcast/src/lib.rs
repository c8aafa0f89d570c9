//! # Shopcast
//!
//! `shopcast` bundles the store analytics engines behind one crate:
//!
//! - [`sales_forecast`]: day-by-day sales and order forecasts with
//!   prediction bounds and a confidence score
//! - [`price_optimizer`]: campaign price search over a discount range
//! - [`sales_math`]: the shared statistics both engines are built on
//!
//! It also carries the service-layer pieces around them: an injected
//! [`config::AnalyticsConfig`] and CSV loaders for both history formats.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use shopcast::{ForecastEngine, ForecastRange};
//! use shopcast::sales_forecast::synthetic::generate_history;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history = generate_history(start, 60, 1_000.0, 0.05, 7).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//!
//! let outcome = ForecastEngine::new().forecast_from(&history, ForecastRange::SevenDays, today);
//! assert_eq!(outcome.points.len(), 7);
//! ```

use thiserror::Error;

pub mod config;
pub mod history;

pub use price_optimizer;
pub use sales_forecast;
pub use sales_math;

pub use config::AnalyticsConfig;
pub use price_optimizer::{
    optimize_price, CampaignWindow, OptimizationGoal, OptimizationOutcome, OptimizationParams,
    PriceOptimizer, SalesObservation,
};
pub use sales_forecast::{
    forecast, ForecastEngine, ForecastOutcome, ForecastPoint, ForecastRange, Observation,
};

/// Errors raised by the service layer around the engines
#[derive(Error, Debug)]
pub enum ShopcastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid record at line {line}: {message}")]
    Record { line: u64, message: String },

    #[error(transparent)]
    Forecast(#[from] sales_forecast::ForecastError),

    #[error(transparent)]
    Optimizer(#[from] price_optimizer::OptimizerError),
}

/// Result type for the service layer
pub type Result<T> = std::result::Result<T, ShopcastError>;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
