//! Confidence scoring for forecasts
//!
//! The overall score multiplies the averaged per-series model confidence by
//! three data-quality factors: history length, seasonal strength and date
//! continuity. Every undefined statistic has an explicit fallback value.

use chrono::{DateTime, Utc};
use sales_math::{stats, LinearTrendModel, SeasonalFactors};

/// Per-series confidence used when the fit statistics are undefined
pub const FALLBACK_CONFIDENCE: f64 = 50.0;
/// Seasonality score used when factor variation cannot be computed
pub const FALLBACK_SEASONALITY: f64 = 0.8;

/// History length at which the data-points score saturates
const FULL_FIT_POINTS: f64 = 30.0;
/// History length at which the data-quality score saturates
const FULL_HISTORY_DAYS: f64 = 60.0;

/// Inputs for [`ConfidenceScorer::overall`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInputs<'a> {
    pub sales_model: &'a LinearTrendModel,
    pub orders_model: &'a LinearTrendModel,
    pub sales_factors: &'a SeasonalFactors,
    pub orders_factors: &'a SeasonalFactors,
    /// Observation timestamps, sorted ascending
    pub timestamps: &'a [DateTime<Utc>],
}

/// Combines fit quality and data quality into a 0-100 score
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Overall confidence in `[0, 100]`
    pub fn overall(&self, inputs: ConfidenceInputs<'_>) -> u8 {
        let sales = self.series_confidence(inputs.sales_model);
        let orders = self.series_confidence(inputs.orders_model);
        let data_quality = self.data_quality_score(inputs.timestamps.len());
        let seasonality = self.seasonality_score(inputs.sales_factors, inputs.orders_factors);
        let consistency = self.consistency_score(inputs.timestamps);

        let score = (sales + orders) / 2.0 * data_quality * seasonality * consistency;
        tracing::debug!(
            sales,
            orders,
            data_quality,
            seasonality,
            consistency,
            score,
            "scored forecast confidence"
        );

        clamp_score(score)
    }

    /// Confidence in a single fitted trend, in `[0, 100]`.
    ///
    /// Weighted as 40% R², 30% amount of data and 30% relative error.
    /// A constant series has no defined R² and scores [`FALLBACK_CONFIDENCE`].
    pub fn series_confidence(&self, model: &LinearTrendModel) -> f64 {
        let Some(r_squared) = model.r_squared() else {
            return FALLBACK_CONFIDENCE;
        };
        let mean_observed = match stats::mean(model.observed()) {
            Ok(mean) if mean.is_finite() && mean > 0.0 => mean,
            _ => {
                tracing::warn!("non-positive series mean, using fallback confidence");
                return FALLBACK_CONFIDENCE;
            }
        };

        let r_squared = r_squared.clamp(0.0, 1.0);
        let data_points = (model.len() as f64 / FULL_FIT_POINTS).min(1.0);
        let error = (1.0 - model.mean_absolute_error() / mean_observed).max(0.0);

        (r_squared * 100.0 * 0.4 + data_points * 30.0 + error * 30.0)
            .round()
            .clamp(0.0, 100.0)
    }

    /// `min(1, history_len / 60)`
    pub fn data_quality_score(&self, history_len: usize) -> f64 {
        (history_len as f64 / FULL_HISTORY_DAYS).min(1.0)
    }

    /// Between 0.8 and 1.0; stronger seasonal swings score higher
    pub fn seasonality_score(&self, sales: &SeasonalFactors, orders: &SeasonalFactors) -> f64 {
        match (sales.variation(), orders.variation()) {
            (Ok(s), Ok(o)) if s.is_finite() && o.is_finite() => {
                0.8 + ((s.min(1.0) + o.min(1.0)) / 4.0).min(0.2)
            }
            _ => {
                tracing::warn!("seasonal variation undefined, using fallback score");
                FALLBACK_SEASONALITY
            }
        }
    }

    /// `max(0.5, 1 - gaps / dates)` where a gap is more than one day between
    /// consecutive timestamps. Fewer than two dates score 0.5.
    pub fn consistency_score(&self, timestamps: &[DateTime<Utc>]) -> f64 {
        if timestamps.len() < 2 {
            return 0.5;
        }
        let gaps = timestamps
            .windows(2)
            .filter(|w| (w[1] - w[0]).num_milliseconds() as f64 / 86_400_000.0 > 1.0)
            .count();

        (1.0 - gaps as f64 / timestamps.len() as f64).max(0.5)
    }
}

fn clamp_score(score: f64) -> u8 {
    if score.is_finite() {
        score.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn daily_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| start + Duration::days(i as i64)).collect()
    }

    fn days(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_constant_series_uses_fallback() {
        let model = LinearTrendModel::fit(&days(10), &[100.0; 10]).unwrap();
        assert_eq!(ConfidenceScorer::new().series_confidence(&model), 50.0);
    }

    #[test]
    fn test_perfect_trend_with_full_history() {
        let xs = days(30);
        let ys: Vec<f64> = xs.iter().map(|x| 100.0 + 2.0 * x).collect();
        let model = LinearTrendModel::fit(&xs, &ys).unwrap();
        assert_eq!(ConfidenceScorer::new().series_confidence(&model), 100.0);
    }

    #[test]
    fn test_series_confidence_weights() {
        let xs = days(15);
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 50.0 + x + if (*x as usize).is_multiple_of(2) { 5.0 } else { -5.0 })
            .collect();
        let model = LinearTrendModel::fit(&xs, &ys).unwrap();

        let r2 = model.r_squared().unwrap().clamp(0.0, 1.0);
        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let error = (1.0 - model.mean_absolute_error() / mean).max(0.0);
        let expected = (r2 * 100.0 * 0.4 + 0.5 * 30.0 + error * 30.0).round();

        assert_eq!(ConfidenceScorer::new().series_confidence(&model), expected);
    }

    #[test]
    fn test_data_quality_score() {
        let scorer = ConfidenceScorer::new();
        assert_relative_eq!(scorer.data_quality_score(30), 0.5);
        assert_relative_eq!(scorer.data_quality_score(60), 1.0);
        assert_relative_eq!(scorer.data_quality_score(365), 1.0);
    }

    #[test]
    fn test_seasonality_score_bounds() {
        let scorer = ConfidenceScorer::new();
        let neutral = SeasonalFactors::neutral();
        assert_relative_eq!(scorer.seasonality_score(&neutral, &neutral), 0.8);

        let mut swinging = SeasonalFactors::neutral();
        swinging.daily = [0.0, 5.0, 0.0, 5.0, 0.0, 5.0, 0.0];
        assert_relative_eq!(scorer.seasonality_score(&swinging, &swinging), 1.0);
    }

    #[test]
    fn test_consistency_score() {
        let scorer = ConfidenceScorer::new();
        assert_eq!(scorer.consistency_score(&daily_timestamps(1)), 0.5);
        assert_eq!(scorer.consistency_score(&daily_timestamps(10)), 1.0);

        let mut stamps = daily_timestamps(10);
        stamps[9] += Duration::days(3);
        assert_relative_eq!(scorer.consistency_score(&stamps), 0.9);

        let sparse: Vec<DateTime<Utc>> = daily_timestamps(40).into_iter().step_by(4).collect();
        assert_eq!(scorer.consistency_score(&sparse), 0.5);
    }

    #[test]
    fn test_overall_is_bounded() {
        let xs = days(90);
        let ys: Vec<f64> = xs.iter().map(|x| 100.0 + x).collect();
        let model = LinearTrendModel::fit(&xs, &ys).unwrap();
        let factors = SeasonalFactors::neutral();
        let stamps = daily_timestamps(90);

        let score = ConfidenceScorer::new().overall(ConfidenceInputs {
            sales_model: &model,
            orders_model: &model,
            sales_factors: &factors,
            orders_factors: &factors,
            timestamps: &stamps,
        });
        // 100 * 1.0 * 0.8 * 1.0
        assert_eq!(score, 80);
    }
}
