//! Campaign window and the calendar multipliers applied over it

use crate::{OptimizerError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Campaigns this short get the full urgency boost
const SHORT_CAMPAIGN_DAYS: u32 = 7;
/// Campaigns this long get no urgency boost
const LONG_CAMPAIGN_DAYS: u32 = 30;
const MAX_TIME_PRESSURE: f64 = 1.5;
const MIN_TIME_PRESSURE: f64 = 1.0;

/// Inclusive date range a pricing decision applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CampaignWindow {
    /// Create a window, rejecting an end date before the start date
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        let window = Self {
            start_date,
            end_date,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(OptimizerError::InvalidArgument(format!(
                "Campaign end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Number of days in the window, both ends included
    pub fn duration_days(&self) -> u32 {
        ((self.end_date - self.start_date).num_days() + 1).max(0) as u32
    }

    /// Every date in the window, in order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }

    /// Sum of the day-of-week multipliers over the window
    pub fn demand_multiplier(&self) -> f64 {
        self.dates().map(day_of_week_factor).sum()
    }

    /// Urgency multiplier for this window's length
    pub fn time_pressure(&self) -> f64 {
        time_pressure_factor(self.duration_days())
    }
}

/// Relative demand for a weekday: weekends sell more
pub fn day_of_week_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Fri | Weekday::Sat => 1.3,
        Weekday::Sun => 1.1,
        _ => 0.9,
    }
}

/// 1.5 for campaigns of a week or less, 1.0 from 30 days, linear in between
pub fn time_pressure_factor(days: u32) -> f64 {
    if days <= SHORT_CAMPAIGN_DAYS {
        MAX_TIME_PRESSURE
    } else if days >= LONG_CAMPAIGN_DAYS {
        MIN_TIME_PRESSURE
    } else {
        let progress = (days - SHORT_CAMPAIGN_DAYS) as f64
            / (LONG_CAMPAIGN_DAYS - SHORT_CAMPAIGN_DAYS) as f64;
        MAX_TIME_PRESSURE - (MAX_TIME_PRESSURE - MIN_TIME_PRESSURE) * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_window() {
        let window = CampaignWindow::new(date(2024, 5, 1), date(2024, 5, 1)).unwrap();
        assert_eq!(window.duration_days(), 1);
        assert_eq!(window.dates().count(), 1);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = CampaignWindow::new(date(2024, 5, 2), date(2024, 5, 1));
        assert!(matches!(result, Err(OptimizerError::InvalidArgument(_))));
    }

    #[test]
    fn test_full_week_multiplier() {
        // 2024-05-06 is a Monday
        let window = CampaignWindow::new(date(2024, 5, 6), date(2024, 5, 12)).unwrap();
        assert_eq!(window.duration_days(), 7);
        assert_relative_eq!(
            window.demand_multiplier(),
            0.9 * 4.0 + 1.3 * 2.0 + 1.1,
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(date(2024, 5, 10), 1.3)]
    #[case(date(2024, 5, 11), 1.3)]
    #[case(date(2024, 5, 12), 1.1)]
    #[case(date(2024, 5, 13), 0.9)]
    fn test_day_of_week_factor(#[case] day: NaiveDate, #[case] expected: f64) {
        assert_eq!(day_of_week_factor(day), expected);
    }

    #[rstest]
    #[case(1, 1.5)]
    #[case(7, 1.5)]
    #[case(30, 1.0)]
    #[case(90, 1.0)]
    fn test_time_pressure_edges(#[case] days: u32, #[case] expected: f64) {
        assert_eq!(time_pressure_factor(days), expected);
    }

    #[test]
    fn test_time_pressure_interpolates() {
        let mid = time_pressure_factor(18);
        assert!(mid > 1.0 && mid < 1.5);
        assert_relative_eq!(time_pressure_factor(8), 1.5 - 0.5 / 23.0, epsilon = 1e-12);
        assert!(time_pressure_factor(20) > time_pressure_factor(21));
    }
}
