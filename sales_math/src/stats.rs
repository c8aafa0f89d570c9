//! Descriptive statistics helpers

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean, or an error for an empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty series".to_string(),
        ));
    }
    Ok(values.iter().mean())
}

/// Population standard deviation (divides by n)
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the standard deviation of an empty series".to_string(),
        ));
    }
    Ok(values.iter().population_std_dev())
}

/// Coefficient of determination from observed values and model predictions.
///
/// Returns `None` when the observed series is constant (total sum of squares
/// is exactly zero), since the ratio is undefined there. The value is not
/// clamped; callers decide how to bound it.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> Result<Option<f64>> {
    if observed.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Observed length ({}) doesn't match predicted length ({})",
            observed.len(),
            predicted.len()
        )));
    }
    let y_mean = mean(observed)?;

    let ss_tot: f64 = observed.iter().map(|y| (y - y_mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(None);
    }
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    Ok(Some(1.0 - ss_res / ss_tot))
}

/// Rounds to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
