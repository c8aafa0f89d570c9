//! Price elasticity of demand
//!
//! Point estimate between the cheapest and the most expensive observed
//! price levels.

use crate::SalesObservation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned when the history cannot support an estimate
pub const DEFAULT_ELASTICITY: f64 = 1.0;

/// Qualitative reading of an elasticity magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElasticityInterpretation {
    /// Below 0.5
    Inelastic,
    /// 0.5 up to 1
    ModeratelyElastic,
    /// 1 up to 2
    Elastic,
    /// 2 and above
    HighlyElastic,
}

impl ElasticityInterpretation {
    pub fn from_value(elasticity: f64) -> Self {
        let magnitude = elasticity.abs();
        if magnitude < 0.5 {
            ElasticityInterpretation::Inelastic
        } else if magnitude < 1.0 {
            ElasticityInterpretation::ModeratelyElastic
        } else if magnitude < 2.0 {
            ElasticityInterpretation::Elastic
        } else {
            ElasticityInterpretation::HighlyElastic
        }
    }

    /// Short explanation suitable for a dashboard tooltip
    pub fn description(&self) -> &'static str {
        match self {
            ElasticityInterpretation::Inelastic => {
                "Demand barely reacts to price; discounts mostly give away margin"
            }
            ElasticityInterpretation::ModeratelyElastic => {
                "Demand reacts to price, but less than proportionally"
            }
            ElasticityInterpretation::Elastic => {
                "Demand reacts more than proportionally to price changes"
            }
            ElasticityInterpretation::HighlyElastic => {
                "Demand is very price sensitive; small discounts move volume"
            }
        }
    }
}

impl fmt::Display for ElasticityInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElasticityInterpretation::Inelastic => write!(f, "Inelastic"),
            ElasticityInterpretation::ModeratelyElastic => write!(f, "Moderately elastic"),
            ElasticityInterpretation::Elastic => write!(f, "Elastic"),
            ElasticityInterpretation::HighlyElastic => write!(f, "Highly elastic"),
        }
    }
}

/// Estimates elasticity magnitude from a sales history
#[derive(Debug, Clone, Copy, Default)]
pub struct ElasticityEstimator;

impl ElasticityEstimator {
    pub fn new() -> Self {
        Self
    }

    /// `|%Δquantity / %Δprice|` between the lowest and highest price levels.
    ///
    /// Observations sharing the exact extreme price are averaged. Returns
    /// [`DEFAULT_ELASTICITY`] for fewer than two observations, a single price
    /// level, or zero quantity at the lowest price.
    pub fn estimate(&self, observations: &[SalesObservation]) -> f64 {
        if observations.len() < 2 {
            return DEFAULT_ELASTICITY;
        }

        let low_price = observations
            .iter()
            .map(|o| o.price)
            .fold(f64::INFINITY, f64::min);
        let high_price = observations
            .iter()
            .map(|o| o.price)
            .fold(f64::NEG_INFINITY, f64::max);
        if !low_price.is_finite() || low_price <= 0.0 || high_price <= low_price {
            return DEFAULT_ELASTICITY;
        }

        let low_quantity = average_quantity_at(observations, low_price);
        let high_quantity = average_quantity_at(observations, high_price);
        if low_quantity <= 0.0 {
            return DEFAULT_ELASTICITY;
        }

        let quantity_change = (high_quantity - low_quantity) / low_quantity;
        let price_change = (high_price - low_price) / low_price;

        (quantity_change / price_change).abs()
    }

    /// Estimate together with its interpretation
    pub fn classify(&self, observations: &[SalesObservation]) -> (f64, ElasticityInterpretation) {
        let elasticity = self.estimate(observations);
        (elasticity, ElasticityInterpretation::from_value(elasticity))
    }
}

fn average_quantity_at(observations: &[SalesObservation], price: f64) -> f64 {
    let (sum, count) = observations
        .iter()
        .filter(|o| o.price == price)
        .fold((0.0, 0usize), |(sum, count), o| {
            (sum + o.quantity as f64, count + 1)
        });
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn obs(price: f64, quantity: u32) -> SalesObservation {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        SalesObservation::new(price, quantity, t)
    }

    #[test]
    fn test_single_observation_default() {
        assert_eq!(ElasticityEstimator::new().estimate(&[obs(10.0, 5)]), 1.0);
        assert_eq!(ElasticityEstimator::new().estimate(&[]), 1.0);
    }

    #[test]
    fn test_single_price_level_default() {
        let history = [obs(10.0, 5), obs(10.0, 8)];
        assert_eq!(ElasticityEstimator::new().estimate(&history), 1.0);
    }

    #[test]
    fn test_extreme_groups_are_averaged() {
        // low group averages 100 units, high group averages 50
        let history = [obs(10.0, 90), obs(10.0, 110), obs(15.0, 70), obs(20.0, 50)];
        // quantity -50%, price +100%
        assert_relative_eq!(ElasticityEstimator::new().estimate(&history), 0.5);
    }

    #[test]
    fn test_zero_quantity_at_low_price() {
        let history = [obs(10.0, 0), obs(20.0, 5)];
        assert_eq!(ElasticityEstimator::new().estimate(&history), 1.0);
    }

    #[rstest]
    #[case(0.2, ElasticityInterpretation::Inelastic)]
    #[case(0.5, ElasticityInterpretation::ModeratelyElastic)]
    #[case(0.99, ElasticityInterpretation::ModeratelyElastic)]
    #[case(1.0, ElasticityInterpretation::Elastic)]
    #[case(1.99, ElasticityInterpretation::Elastic)]
    #[case(2.0, ElasticityInterpretation::HighlyElastic)]
    #[case(7.5, ElasticityInterpretation::HighlyElastic)]
    fn test_interpretation_thresholds(
        #[case] value: f64,
        #[case] expected: ElasticityInterpretation,
    ) {
        assert_eq!(ElasticityInterpretation::from_value(value), expected);
    }

    #[test]
    fn test_classify() {
        let history = [obs(10.0, 100), obs(11.0, 70)];
        let (value, interpretation) = ElasticityEstimator::new().classify(&history);
        assert_relative_eq!(value, 3.0, epsilon = 1e-9);
        assert_eq!(interpretation, ElasticityInterpretation::HighlyElastic);
        assert!(!interpretation.description().is_empty());
    }
}
