//! Calendar seasonality factors
//!
//! A factor is the average of a calendar bucket divided by the overall
//! average of the series. Buckets without observations are neutral (1.0).

use crate::stats;
use crate::{MathError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day-of-week and month multipliers for one metric.
///
/// Day-of-week index 0 is Sunday; month index 0 is January.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactors {
    pub daily: [f64; 7],
    pub monthly: [f64; 12],
}

impl Default for SeasonalFactors {
    fn default() -> Self {
        Self::neutral()
    }
}

impl SeasonalFactors {
    /// All factors equal to 1.0
    pub fn neutral() -> Self {
        Self {
            daily: [1.0; 7],
            monthly: [1.0; 12],
        }
    }

    /// Day-of-week factors bucketed per week.
    ///
    /// Averaging by weekday gives exactly the same buckets as [`Self::daily`],
    /// so this returns the same array.
    pub fn weekly(&self) -> [f64; 7] {
        self.daily
    }

    /// Combined multiplier for a calendar date
    pub fn multiplier(&self, date: NaiveDate) -> f64 {
        let day = date.weekday().num_days_from_sunday() as usize;
        self.daily[day] * self.monthly[date.month0() as usize]
    }

    /// Population standard deviation of the daily and monthly factors together
    pub fn variation(&self) -> Result<f64> {
        let all: Vec<f64> = self.daily.iter().chain(&self.monthly).copied().collect();
        stats::population_std_dev(&all)
    }
}

/// Computes [`SeasonalFactors`] for a dated series
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalityAnalyzer;

impl SeasonalityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compute factors for `series`, where `dates[i]` is the date of `series[i]`.
    ///
    /// Fails if the lengths differ, the series is empty, or its mean is not a
    /// positive finite number.
    pub fn analyze(&self, series: &[f64], dates: &[NaiveDate]) -> Result<SeasonalFactors> {
        if series.len() != dates.len() {
            return Err(MathError::InvalidInput(format!(
                "Series length ({}) doesn't match dates length ({})",
                series.len(),
                dates.len()
            )));
        }
        let overall = stats::mean(series)?;
        if !overall.is_finite() || overall <= 0.0 {
            return Err(MathError::CalculationError(format!(
                "Series mean must be positive to derive seasonal factors, got {}",
                overall
            )));
        }

        let mut day_sums = [0.0; 7];
        let mut day_counts = [0usize; 7];
        let mut month_sums = [0.0; 12];
        let mut month_counts = [0usize; 12];

        for (&value, date) in series.iter().zip(dates) {
            let day = date.weekday().num_days_from_sunday() as usize;
            let month = date.month0() as usize;
            day_sums[day] += value;
            day_counts[day] += 1;
            month_sums[month] += value;
            month_counts[month] += 1;
        }

        Ok(SeasonalFactors {
            daily: bucket_factors(day_sums, day_counts, overall),
            monthly: bucket_factors(month_sums, month_counts, overall),
        })
    }
}

fn bucket_factors<const N: usize>(sums: [f64; N], counts: [usize; N], overall: f64) -> [f64; N] {
    let mut factors = [1.0; N];
    for (factor, (sum, count)) in factors.iter_mut().zip(sums.iter().zip(counts)) {
        if count > 0 {
            *factor = (sum / count as f64) / overall;
        }
    }
    factors
}
