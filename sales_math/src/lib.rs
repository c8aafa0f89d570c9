//! # Sales Math
//!
//! Statistical building blocks shared by the forecasting and pricing engines.
//! Everything in this crate is a pure function of its inputs.
//!
//! - [`outliers`]: IQR-based outlier repair for daily series
//! - [`regression`]: ordinary least squares trend and demand models
//! - [`seasonality`]: day-of-week and month seasonal factors
//! - [`stats`]: small descriptive statistics helpers

use thiserror::Error;

pub mod outliers;
pub mod regression;
pub mod seasonality;
pub mod stats;

pub use outliers::OutlierFilter;
pub use regression::{LinearDemandModel, LinearTrendModel, PredictionInterval};
pub use seasonality::{SeasonalFactors, SeasonalityAnalyzer};

/// Errors that can occur in statistical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for statistical operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::InsufficientData("need 2 points".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 2 points"
        );

        let err = MathError::CalculationError("zero mean".to_string());
        assert!(err.to_string().contains("zero mean"));
    }
}
