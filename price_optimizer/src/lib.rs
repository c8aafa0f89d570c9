//! # Price Optimizer
//!
//! `price_optimizer` picks a campaign price from historical
//! `(price, quantity)` observations.
//!
//! A linear demand curve is fitted to the history, a grid of candidate prices
//! inside the allowed discount range is evaluated against the chosen goal,
//! and the best candidate is projected over the campaign window.
//!
//! ## Goals
//!
//! - **Profit**: `(price - cost) * quantity`
//! - **Sales**: `price * quantity`
//! - **Inventory**: favours sell-through velocity, scaled by campaign urgency
//!
//! ## Usage Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use price_optimizer::{OptimizationGoal, OptimizationParams, PriceOptimizer, SalesObservation};
//!
//! let day = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let history = vec![
//!     SalesObservation::new(80.0, 30, day),
//!     SalesObservation::new(100.0, 20, day),
//! ];
//! let params = OptimizationParams::new(100.0, 50.0, OptimizationGoal::Profit, 0.0, 30.0);
//!
//! let outcome = PriceOptimizer::new().optimize(&history, &params).unwrap();
//! assert!(outcome.optimal_price >= 70.0 && outcome.optimal_price <= 100.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod campaign;
pub mod elasticity;
pub mod optimizer;

pub use campaign::{day_of_week_factor, time_pressure_factor, CampaignWindow};
pub use elasticity::{ElasticityEstimator, ElasticityInterpretation, DEFAULT_ELASTICITY};
pub use optimizer::{
    candidate_prices, optimize_price, OptimizationGoal, OptimizationOutcome, OptimizationParams,
    PriceOptimizer, CANDIDATE_COUNT,
};

/// Errors that can occur in price optimization
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Calculation error: {0}")]
    CalculationError(#[from] sales_math::MathError),
}

/// Result type for price optimization
pub type Result<T> = std::result::Result<T, OptimizerError>;

/// A historical sale at a given unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    /// Unit price charged
    pub price: f64,
    /// Units sold
    pub quantity: u32,
    /// When the sale was recorded
    pub timestamp: DateTime<Utc>,
}

impl SalesObservation {
    pub fn new(price: f64, quantity: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            price,
            quantity,
            timestamp,
        }
    }
}
