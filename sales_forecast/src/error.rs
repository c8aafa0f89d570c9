//! Error types for the sales_forecast crate

use sales_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate.
///
/// Low-data situations are not errors here: the engine answers them with an
/// empty, low-confidence outcome instead.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the statistics layer
    #[error("Math error: {0}")]
    MathError(#[from] MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
