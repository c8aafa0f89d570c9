//! Forecast orchestration
//!
//! Validate, sort, clean, fit, derive seasonality, generate points and score.
//! Low-data inputs produce an empty outcome rather than an error.

use crate::confidence::{ConfidenceInputs, ConfidenceScorer};
use crate::data::{start_of_day, ForecastOutcome, ForecastPoint, ForecastRange, Observation};
use chrono::{DateTime, Days, NaiveDate, Utc};
use sales_math::{LinearTrendModel, OutlierFilter, SeasonalFactors, SeasonalityAnalyzer};

/// Minimum history length before any points are generated
pub const MIN_HISTORY: usize = 7;

/// Confidence awarded per observation when history is too short
const SHORT_HISTORY_CONFIDENCE_PER_POINT: usize = 7;
/// Cap on the short-history confidence
const SHORT_HISTORY_MAX_CONFIDENCE: usize = 50;

/// Trend plus seasonality forecaster for daily sales and orders
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    outlier_filter: OutlierFilter,
    seasonality: SeasonalityAnalyzer,
    scorer: ConfidenceScorer,
}

/// A cleaned metric with its fitted trend and seasonal factors
struct FittedSeries {
    model: LinearTrendModel,
    factors: SeasonalFactors,
}

impl FittedSeries {
    /// Rounded value and bounds at `x` days, adjusted for the calendar of `date`
    fn project(&self, x: f64, date: NaiveDate) -> (u64, u64, u64) {
        let multiplier = self.factors.multiplier(date);
        let interval = self.model.prediction_interval(x);

        (
            to_count(interval.predicted * multiplier),
            to_count(interval.lower * multiplier),
            to_count(interval.upper * multiplier),
        )
    }
}

impl ForecastEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom outlier filter instead of the default 1.5 IQR fences
    pub fn with_outlier_filter(mut self, filter: OutlierFilter) -> Self {
        self.outlier_filter = filter;
        self
    }

    /// Forecast `range` days starting today (UTC)
    pub fn forecast(&self, history: &[Observation], range: ForecastRange) -> ForecastOutcome {
        self.forecast_from(history, range, Utc::now().date_naive())
    }

    /// Forecast `range` days starting at `today`
    pub fn forecast_from(
        &self,
        history: &[Observation],
        range: ForecastRange,
        today: NaiveDate,
    ) -> ForecastOutcome {
        if history.is_empty() {
            tracing::debug!("empty history, nothing to forecast");
            return ForecastOutcome::empty(0);
        }
        if history.iter().all(|o| o.sales == 0.0) || history.iter().all(|o| o.orders == 0.0) {
            tracing::debug!(len = history.len(), "all-zero history, nothing to forecast");
            return ForecastOutcome::empty(0);
        }
        if history.len() < MIN_HISTORY {
            let confidence = (history.len() * SHORT_HISTORY_CONFIDENCE_PER_POINT)
                .min(SHORT_HISTORY_MAX_CONFIDENCE);
            tracing::debug!(len = history.len(), confidence, "history too short");
            return ForecastOutcome::empty(confidence as u8);
        }

        let mut sorted = history.to_vec();
        sorted.sort_by_key(|o| o.timestamp);
        let origin = sorted[0].timestamp;

        let timestamps: Vec<DateTime<Utc>> = sorted.iter().map(|o| o.timestamp).collect();
        let xs: Vec<f64> = timestamps.iter().map(|&t| days_between(origin, t)).collect();
        let dates: Vec<NaiveDate> = timestamps.iter().map(|t| t.date_naive()).collect();
        let sales: Vec<f64> = sorted.iter().map(|o| o.sales).collect();
        let orders: Vec<f64> = sorted.iter().map(|o| o.orders).collect();

        let fitted = self
            .fit_series(&xs, &sales, &dates, "sales")
            .zip(self.fit_series(&xs, &orders, &dates, "orders"));
        let Some((sales, orders)) = fitted else {
            return ForecastOutcome::empty(0);
        };
        tracing::debug!(
            len = sorted.len(),
            sales_slope = sales.model.slope(),
            orders_slope = orders.model.slope(),
            "fitted trend models"
        );

        let points = (0..range.days())
            .filter_map(|offset| today.checked_add_days(Days::new(offset as u64)))
            .map(|date| {
                let x = days_between(origin, start_of_day(date));
                let (sales_value, sales_lower, sales_upper) = sales.project(x, date);
                let (orders_value, orders_lower, orders_upper) = orders.project(x, date);

                ForecastPoint {
                    date,
                    sales: sales_value,
                    orders: orders_value,
                    sales_lower,
                    sales_upper,
                    orders_lower,
                    orders_upper,
                    is_forecast: true,
                }
            })
            .collect();

        let confidence = self.scorer.overall(ConfidenceInputs {
            sales_model: &sales.model,
            orders_model: &orders.model,
            sales_factors: &sales.factors,
            orders_factors: &orders.factors,
            timestamps: &timestamps,
        });

        ForecastOutcome { points, confidence }
    }

    fn fit_series(
        &self,
        xs: &[f64],
        raw: &[f64],
        dates: &[NaiveDate],
        metric: &str,
    ) -> Option<FittedSeries> {
        let cleaned = self.outlier_filter.clean(raw);

        let model = match LinearTrendModel::fit(xs, &cleaned) {
            Ok(model) => model,
            Err(err) => {
                tracing::warn!(metric, error = %err, "trend fit failed");
                return None;
            }
        };
        let factors = self
            .seasonality
            .analyze(&cleaned, dates)
            .unwrap_or_else(|err| {
                tracing::warn!(metric, error = %err, "using neutral seasonal factors");
                SeasonalFactors::neutral()
            });

        Some(FittedSeries { model, factors })
    }
}

/// Fractional days from `origin` to `t`
fn days_between(origin: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
    (t - origin).num_milliseconds() as f64 / 86_400_000.0
}

/// Round to a whole non-negative count
fn to_count(value: f64) -> u64 {
    if value.is_finite() {
        value.round().max(0.0) as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_days_between_fractional() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = a + Duration::hours(36);
        assert_eq!(days_between(a, b), 1.5);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(-3.2), 0);
        assert_eq!(to_count(2.5), 3);
        assert_eq!(to_count(f64::NAN), 0);
    }
}
