//! Ordinary least squares models
//!
//! Two thin wrappers over the same one-variable OLS fit:
//! - [`LinearTrendModel`]: metric against elapsed days, with prediction intervals
//! - [`LinearDemandModel`]: quantity sold against unit price

use crate::stats;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Two-sided 95% normal quantile used for prediction intervals
pub const Z_95: f64 = 1.96;

/// Below this the x values are treated as having no spread
const MIN_SXX: f64 = 1e-10;

/// Fitted coefficients of `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct OlsFit {
    intercept: f64,
    slope: f64,
    x_mean: f64,
    /// Sum of squared deviations of x from its mean
    sxx: f64,
}

impl OlsFit {
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                xs.len(),
                ys.len()
            )));
        }
        let x_mean = stats::mean(xs)?;
        let y_mean = stats::mean(ys)?;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            sxx += (x - x_mean) * (x - x_mean);
            sxy += (x - x_mean) * (y - y_mean);
        }

        // A single point or identical x values: flat line through the mean
        let slope = if sxx < MIN_SXX { 0.0 } else { sxy / sxx };

        Ok(Self {
            intercept: y_mean - slope * x_mean,
            slope,
            x_mean,
            sxx,
        })
    }

    fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Prediction at a point together with its 95% prediction interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub predicted: f64,
    /// Lower bound, never below zero
    pub lower: f64,
    pub upper: f64,
}

/// Linear trend of a daily metric against days since the first observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearTrendModel {
    fit: OlsFit,
    observed: Vec<f64>,
    residuals: Vec<f64>,
}

impl LinearTrendModel {
    /// Fit the trend line. `xs` are elapsed days, `ys` the metric values.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let fit = OlsFit::fit(xs, ys)?;
        let residuals = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| y - fit.predict(x))
            .collect();

        Ok(Self {
            fit,
            observed: ys.to_vec(),
            residuals,
        })
    }

    pub fn slope(&self) -> f64 {
        self.fit.slope
    }

    pub fn intercept(&self) -> f64 {
        self.fit.intercept
    }

    /// Number of observations the model was fitted on
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Observed values the model was fitted on
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Trend value at `x` days since the first observation
    pub fn predict(&self, x: f64) -> f64 {
        self.fit.predict(x)
    }

    /// Observed minus fitted, in input order
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Unclamped R², or `None` for a constant series
    pub fn r_squared(&self) -> Option<f64> {
        let fitted: Vec<f64> = self
            .observed
            .iter()
            .zip(&self.residuals)
            .map(|(y, r)| y - r)
            .collect();
        stats::r_squared(&self.observed, &fitted).ok().flatten()
    }

    pub fn mean_absolute_error(&self) -> f64 {
        self.residuals.iter().map(|r| r.abs()).sum::<f64>() / self.residuals.len() as f64
    }

    /// `sqrt(SSres / (n - 2))`, or `None` with two or fewer observations
    pub fn residual_standard_error(&self) -> Option<f64> {
        let n = self.residuals.len();
        if n <= 2 {
            return None;
        }
        let ss_res: f64 = self.residuals.iter().map(|r| r * r).sum();
        Some((ss_res / (n - 2) as f64).sqrt())
    }

    /// 95% prediction interval at `x0`, lower bound clamped to zero
    pub fn prediction_interval(&self, x0: f64) -> PredictionInterval {
        let predicted = self.predict(x0);
        let n = self.residuals.len() as f64;

        let half_width = match self.residual_standard_error() {
            Some(s) => {
                let leverage = if self.fit.sxx < MIN_SXX {
                    0.0
                } else {
                    (x0 - self.fit.x_mean).powi(2) / self.fit.sxx
                };
                s * (1.0 + 1.0 / n + leverage).sqrt()
            }
            None => 0.0,
        };
        let margin = Z_95 * half_width;

        PredictionInterval {
            predicted,
            lower: (predicted - margin).max(0.0),
            upper: predicted + margin,
        }
    }
}

/// Linear demand curve: expected daily quantity as a function of price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearDemandModel {
    fit: OlsFit,
    r_squared: Option<f64>,
}

impl LinearDemandModel {
    /// Fit quantity against price
    pub fn fit(prices: &[f64], quantities: &[f64]) -> Result<Self> {
        let fit = OlsFit::fit(prices, quantities)?;
        let fitted: Vec<f64> = prices.iter().map(|&p| fit.predict(p)).collect();
        let r_squared = stats::r_squared(quantities, &fitted)?;

        Ok(Self { fit, r_squared })
    }

    /// Change in daily quantity per unit of price
    pub fn slope(&self) -> f64 {
        self.fit.slope
    }

    pub fn intercept(&self) -> f64 {
        self.fit.intercept
    }

    /// Predicted daily quantity at `price`, floored at zero
    pub fn predict_quantity(&self, price: f64) -> f64 {
        self.fit.predict(price).max(0.0)
    }

    /// Unclamped R² of the fit, or `None` if quantities never varied
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}
