//! Grid-search price optimization
//!
//! Candidates are evaluated in ascending price order and only a strictly
//! better objective replaces the incumbent, so ties resolve to the lowest
//! price. The incumbent starts as the current price with objective zero.

use crate::campaign::CampaignWindow;
use crate::elasticity::{ElasticityEstimator, ElasticityInterpretation};
use crate::{OptimizerError, Result, SalesObservation};
use sales_math::stats::round_to;
use sales_math::LinearDemandModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of evenly spaced candidate prices
pub const CANDIDATE_COUNT: usize = 50;

/// Weight of sell-through velocity in the inventory objective
const INVENTORY_VELOCITY_WEIGHT: f64 = 0.6;
/// Weight of unit margin in the inventory objective
const INVENTORY_MARGIN_WEIGHT: f64 = 0.4;

/// What the price search maximizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationGoal {
    /// Maximize `(price - cost) * quantity`
    #[default]
    Profit,
    /// Maximize revenue
    Sales,
    /// Clear stock quickly while keeping some margin
    Inventory,
}

impl OptimizationGoal {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizationGoal::Profit => "profit",
            OptimizationGoal::Sales => "sales",
            OptimizationGoal::Inventory => "inventory",
        }
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationGoal {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "profit" => Ok(OptimizationGoal::Profit),
            "sales" => Ok(OptimizationGoal::Sales),
            "inventory" => Ok(OptimizationGoal::Inventory),
            _ => Err(OptimizerError::InvalidArgument(format!(
                "Unknown optimization goal: {}",
                s
            ))),
        }
    }
}

/// Parameters of a single optimization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationParams {
    pub current_price: f64,
    /// Unit cost
    pub cost: f64,
    pub goal: OptimizationGoal,
    /// Smallest allowed discount, in percent
    pub min_discount: f64,
    /// Largest allowed discount, in percent
    pub max_discount: f64,
    #[serde(default)]
    pub campaign: Option<CampaignWindow>,
}

impl OptimizationParams {
    pub fn new(
        current_price: f64,
        cost: f64,
        goal: OptimizationGoal,
        min_discount: f64,
        max_discount: f64,
    ) -> Self {
        Self {
            current_price,
            cost,
            goal,
            min_discount,
            max_discount,
            campaign: None,
        }
    }

    pub fn with_campaign(mut self, campaign: CampaignWindow) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Reject prices, costs, discount ranges or windows that cannot be searched
    pub fn validate(&self) -> Result<()> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(OptimizerError::InvalidArgument(format!(
                "Current price must be positive, got {}",
                self.current_price
            )));
        }
        if !self.cost.is_finite() || self.cost <= 0.0 {
            return Err(OptimizerError::InvalidArgument(format!(
                "Cost must be positive, got {}",
                self.cost
            )));
        }
        let in_range = |d: f64| d.is_finite() && (0.0..100.0).contains(&d);
        if !in_range(self.min_discount) || !in_range(self.max_discount) {
            return Err(OptimizerError::InvalidArgument(format!(
                "Discounts must lie in [0, 100), got {} and {}",
                self.min_discount, self.max_discount
            )));
        }
        if self.min_discount > self.max_discount {
            return Err(OptimizerError::InvalidArgument(format!(
                "Minimum discount {} exceeds maximum discount {}",
                self.min_discount, self.max_discount
            )));
        }
        if let Some(campaign) = &self.campaign {
            campaign.validate()?;
        }
        Ok(())
    }

    /// Campaign length in days; one day when no window is given
    pub fn campaign_days(&self) -> u32 {
        self.campaign.map_or(1, |c| c.duration_days())
    }
}

/// Recommended price and its projected effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub goal: OptimizationGoal,
    /// Recommended unit price, rounded to cents
    pub optimal_price: f64,
    /// Discount from the current price in percent, one decimal
    pub optimal_discount: f64,
    pub campaign_days: u32,
    pub expected_daily_quantity: u64,
    pub expected_total_quantity: u64,
    pub projected_daily_revenue: f64,
    pub projected_total_revenue: f64,
    pub projected_daily_profit: f64,
    pub projected_total_profit: f64,
    pub elasticity: f64,
    pub elasticity_interpretation: ElasticityInterpretation,
    /// Demand fit quality in `[0, 100]`
    pub confidence: u8,
    /// False when no candidate beat a zero objective and the current price
    /// was kept as the default
    pub has_viable_price: bool,
}

/// Demand projection for one candidate price
#[derive(Debug, Clone, Copy)]
struct Projection {
    price: f64,
    daily_quantity: f64,
    total_quantity: f64,
}

/// Searches a discount grid for the price that maximizes a goal
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceOptimizer {
    elasticity: ElasticityEstimator,
}

impl PriceOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the best price for `params` given the sales `history`
    pub fn optimize(
        &self,
        history: &[SalesObservation],
        params: &OptimizationParams,
    ) -> Result<OptimizationOutcome> {
        params.validate()?;

        let demand = if history.is_empty() {
            tracing::debug!("empty sales history, demand assumed zero");
            None
        } else {
            let prices: Vec<f64> = history.iter().map(|o| o.price).collect();
            let quantities: Vec<f64> = history.iter().map(|o| o.quantity as f64).collect();
            Some(LinearDemandModel::fit(&prices, &quantities)?)
        };
        let average_quantity = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|o| o.quantity as f64).sum::<f64>() / history.len() as f64
        };

        let campaign_days = params.campaign_days();
        let (demand_multiplier, time_pressure) = match &params.campaign {
            Some(campaign) => (campaign.demand_multiplier(), campaign.time_pressure()),
            None => (1.0, 1.0),
        };
        let project = |price: f64| {
            let daily = demand
                .as_ref()
                .map_or(0.0, |model| model.predict_quantity(price));
            Projection {
                price,
                daily_quantity: daily,
                total_quantity: daily * demand_multiplier,
            }
        };

        let mut best_price = params.current_price;
        let mut best_value = 0.0;
        let mut has_viable_price = false;

        let candidates =
            candidate_prices(params.current_price, params.min_discount, params.max_discount);
        for price in candidates {
            let value = objective(
                params.goal,
                &project(price),
                params.cost,
                average_quantity,
                time_pressure,
            );
            if value > best_value {
                best_value = value;
                best_price = price;
                has_viable_price = true;
            }
        }

        if !has_viable_price {
            tracing::warn!(
                goal = %params.goal,
                current_price = params.current_price,
                cost = params.cost,
                "no candidate price has a positive objective, keeping current price"
            );
        }

        let best = project(best_price);
        let daily_quantity = best.total_quantity / campaign_days as f64;
        let margin = best.price - params.cost;
        let (elasticity, elasticity_interpretation) = self.elasticity.classify(history);

        let confidence = demand
            .as_ref()
            .and_then(|model| model.r_squared())
            .map_or(0.0, |r2| (r2.clamp(0.0, 1.0) * 100.0).round()) as u8;

        tracing::debug!(
            goal = %params.goal,
            price = best.price,
            objective = best_value,
            elasticity,
            confidence,
            "selected campaign price"
        );

        Ok(OptimizationOutcome {
            goal: params.goal,
            optimal_price: round_to(best.price, 2),
            optimal_discount: round_to(
                (params.current_price - best.price) / params.current_price * 100.0,
                1,
            ),
            campaign_days,
            expected_daily_quantity: whole(daily_quantity) as u64,
            expected_total_quantity: whole(best.total_quantity) as u64,
            projected_daily_revenue: whole(best.price * daily_quantity),
            projected_total_revenue: whole(best.price * best.total_quantity),
            projected_daily_profit: whole(margin * daily_quantity),
            projected_total_profit: whole(margin * best.total_quantity),
            elasticity: round_to(elasticity, 2),
            elasticity_interpretation,
            confidence,
            has_viable_price,
        })
    }
}

/// Optimize with the default optimizer
pub fn optimize_price(
    current_price: f64,
    cost: f64,
    history: &[SalesObservation],
    goal: OptimizationGoal,
    min_discount: f64,
    max_discount: f64,
    campaign: Option<CampaignWindow>,
) -> Result<OptimizationOutcome> {
    let params = OptimizationParams {
        current_price,
        cost,
        goal,
        min_discount,
        max_discount,
        campaign,
    };
    PriceOptimizer::new().optimize(history, &params)
}

/// [`CANDIDATE_COUNT`] evenly spaced prices from the deepest to the
/// shallowest allowed discount, ascending
pub fn candidate_prices(current_price: f64, min_discount: f64, max_discount: f64) -> Vec<f64> {
    let low = current_price * (1.0 - max_discount / 100.0);
    let high = current_price * (1.0 - min_discount / 100.0);
    let step = (high - low) / (CANDIDATE_COUNT - 1) as f64;

    (0..CANDIDATE_COUNT)
        .map(|i| {
            if i == CANDIDATE_COUNT - 1 {
                high
            } else {
                low + step * i as f64
            }
        })
        .collect()
}

fn objective(
    goal: OptimizationGoal,
    projection: &Projection,
    cost: f64,
    average_quantity: f64,
    time_pressure: f64,
) -> f64 {
    let Projection {
        price,
        daily_quantity,
        total_quantity,
    } = *projection;

    match goal {
        OptimizationGoal::Profit => (price - cost) * total_quantity,
        OptimizationGoal::Sales => price * total_quantity,
        OptimizationGoal::Inventory => {
            let velocity = if average_quantity > 0.0 {
                daily_quantity / average_quantity
            } else {
                0.0
            };
            let margin = (price - cost) / price;
            (INVENTORY_VELOCITY_WEIGHT * velocity * time_pressure
                + INVENTORY_MARGIN_WEIGHT * margin)
                * total_quantity
        }
    }
}

/// Round to a whole non-negative amount
fn whole(value: f64) -> f64 {
    if value.is_finite() {
        value.round().max(0.0)
    } else {
        0.0
    }
}
