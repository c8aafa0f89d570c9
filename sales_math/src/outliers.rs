//! Outlier repair for daily metric series
//!
//! Values outside the Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]` are replaced by
//! the mean of their in-fence neighbours. Nothing is removed, so the output
//! always lines up index-for-index with the input.

use crate::{MathError, Result};

/// Minimum series length for which quartiles are meaningful
const MIN_POINTS: usize = 4;

/// IQR-based outlier filter with local neighbour smoothing
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    /// Multiplier applied to the interquartile range
    iqr_multiplier: f64,
    /// Neighbours considered on each side of a flagged value
    radius: usize,
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            radius: 3,
        }
    }
}

impl OutlierFilter {
    /// Create a filter with custom fence width and neighbourhood radius
    pub fn new(iqr_multiplier: f64, radius: usize) -> Result<Self> {
        if !iqr_multiplier.is_finite() || iqr_multiplier <= 0.0 {
            return Err(MathError::InvalidInput(
                "IQR multiplier must be positive".to_string(),
            ));
        }
        if radius == 0 {
            return Err(MathError::InvalidInput(
                "Neighbourhood radius must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            iqr_multiplier,
            radius,
        })
    }

    /// Lower and upper fences for `series`, or `None` if it is too short
    pub fn bounds(&self, series: &[f64]) -> Option<(f64, f64)> {
        let (q1, q3) = quartiles(series)?;
        let iqr = q3 - q1;
        Some((
            q1 - self.iqr_multiplier * iqr,
            q3 + self.iqr_multiplier * iqr,
        ))
    }

    /// Return a copy of `series` with outliers smoothed over.
    ///
    /// Series shorter than four points are returned unchanged. A flagged
    /// value with no in-fence neighbour keeps its original value.
    pub fn clean(&self, series: &[f64]) -> Vec<f64> {
        let Some((lower, upper)) = self.bounds(series) else {
            return series.to_vec();
        };
        let in_bounds = |v: f64| v >= lower && v <= upper;

        let mut cleaned = series.to_vec();
        let mut repaired = 0usize;

        for (i, &value) in series.iter().enumerate() {
            if in_bounds(value) {
                continue;
            }

            let start = i.saturating_sub(self.radius);
            let end = (i + self.radius + 1).min(series.len());
            let neighbours: Vec<f64> = series[start..end]
                .iter()
                .enumerate()
                .filter(|(j, v)| start + j != i && in_bounds(**v))
                .map(|(_, v)| *v)
                .collect();

            if !neighbours.is_empty() {
                cleaned[i] = neighbours.iter().sum::<f64>() / neighbours.len() as f64;
                repaired += 1;
            }
        }

        if repaired > 0 {
            tracing::debug!(repaired, len = series.len(), "smoothed outliers");
        }

        cleaned
    }
}

/// First and third quartiles by sorted-index lookup (no interpolation)
pub fn quartiles(series: &[f64]) -> Option<(f64, f64)> {
    if series.len() < MIN_POINTS {
        return None;
    }

    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let q1 = sorted[(n as f64 * 0.25).floor() as usize];
    let q3 = sorted[(n as f64 * 0.75).floor() as usize];

    Some((q1, q3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(vec![])]
    #[case(vec![5.0])]
    #[case(vec![1.0, 1000.0, 1.0])]
    fn test_short_series_unchanged(#[case] series: Vec<f64>) {
        let cleaned = OutlierFilter::default().clean(&series);
        assert_eq!(cleaned, series);
    }

    #[test]
    fn test_quartiles_use_floor_index() {
        let series = [8.0, 1.0, 4.0, 2.0, 7.0, 3.0, 6.0, 5.0];
        // sorted: 1..=8, n=8 -> indices 2 and 6
        assert_eq!(quartiles(&series), Some((3.0, 7.0)));
    }

    #[test]
    fn test_spike_replaced_by_neighbour_mean() {
        let series = vec![10.0, 11.0, 9.0, 10.0, 500.0, 10.0, 12.0, 9.0, 10.0];
        let cleaned = OutlierFilter::default().clean(&series);

        assert_eq!(cleaned.len(), series.len());
        // neighbours at indices 1..=3 and 5..=7
        let expected = (11.0 + 9.0 + 10.0 + 10.0 + 12.0 + 9.0) / 6.0;
        assert_relative_eq!(cleaned[4], expected);
        for i in (0..series.len()).filter(|&i| i != 4) {
            assert_eq!(cleaned[i], series[i]);
        }
    }

    #[test]
    fn test_window_truncated_at_edges() {
        let series = vec![500.0, 10.0, 11.0, 9.0, 10.0, 10.0, 10.0, 10.0];
        let cleaned = OutlierFilter::default().clean(&series);
        assert_relative_eq!(cleaned[0], 10.0);
    }

    #[test]
    fn test_outlier_kept_without_valid_neighbours() {
        let filter = OutlierFilter::new(1.5, 1).unwrap();
        let series = vec![10.0, 10.0, 10.0, 10.0, 10.0, 900.0, 950.0, 10.0, 10.0, 10.0, 10.0];
        let cleaned = filter.clean(&series);
        assert_relative_eq!(cleaned[5], 10.0);
        assert_relative_eq!(cleaned[6], 10.0);

        // both neighbours of index 5 are outliers too
        let series = vec![
            10.0, 10.0, 10.0, 10.0, 900.0, 900.0, 900.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0,
        ];
        let cleaned = filter.clean(&series);
        assert_eq!(cleaned[5], 900.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(OutlierFilter::new(0.0, 3).is_err());
        assert!(OutlierFilter::new(1.5, 0).is_err());
    }
}
