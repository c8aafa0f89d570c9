//! # shopcast
//!
//! Command-line front end for the forecasting and pricing engines.
//! Results are printed to stdout as pretty JSON.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use shopcast::history::{load_metrics, load_price_history};
use shopcast::sales_forecast::synthetic::generate_history;
use shopcast::{
    AnalyticsConfig, CampaignWindow, ForecastEngine, ForecastRange, OptimizationGoal,
    OptimizationParams, PriceOptimizer,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shopcast", version)]
#[command(about = "Sales forecasting and campaign price optimization", long_about = None)]
struct Cli {
    /// JSON config file (falls back to $SHOPCAST_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast daily sales and orders from a metrics history
    Forecast {
        /// CSV with columns timestamp,sales,orders
        #[arg(long)]
        history: PathBuf,

        /// Horizon: 7d, 14d, 1month, 3months or 6months
        #[arg(short, long)]
        range: Option<ForecastRange>,

        /// First forecast day (defaults to the current UTC date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Find the best campaign price from a price/quantity history
    Optimize {
        /// CSV with columns price,quantity,timestamp
        #[arg(long)]
        history: PathBuf,

        /// Current unit price
        #[arg(long)]
        price: f64,

        /// Unit cost
        #[arg(long)]
        cost: f64,

        /// Goal: profit, sales or inventory
        #[arg(short, long)]
        goal: Option<OptimizationGoal>,

        /// Smallest discount in percent
        #[arg(long)]
        min_discount: Option<f64>,

        /// Largest discount in percent
        #[arg(long)]
        max_discount: Option<f64>,

        /// Campaign start date
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Campaign end date, inclusive
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// Forecast a synthetic history
    Demo {
        /// Days of history to generate
        #[arg(long, default_value = "90")]
        days: usize,

        /// Random seed
        #[arg(long, default_value = "7")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AnalyticsConfig::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let output = match cli.command {
        Commands::Forecast {
            history,
            range,
            today,
        } => {
            let observations = load_metrics(&history)
                .with_context(|| format!("reading {}", history.display()))?;
            let range = range.unwrap_or(config.default_range);
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            info!(rows = observations.len(), %range, %today, "forecasting");

            let outcome = ForecastEngine::new().forecast_from(&observations, range, today);
            json!({
                "range": range,
                "summary": outcome.summary(),
                "forecast": outcome,
            })
        }
        Commands::Optimize {
            history,
            price,
            cost,
            goal,
            min_discount,
            max_discount,
            start,
            end,
        } => {
            let observations = load_price_history(&history)
                .with_context(|| format!("reading {}", history.display()))?;
            let mut params = OptimizationParams::new(
                price,
                cost,
                goal.unwrap_or(config.default_goal),
                min_discount.unwrap_or(config.min_discount),
                max_discount.unwrap_or(config.max_discount),
            );
            if let (Some(start), Some(end)) = (start, end) {
                params = params.with_campaign(CampaignWindow::new(start, end)?);
            }
            info!(rows = observations.len(), goal = %params.goal, "optimizing price");

            let outcome = PriceOptimizer::new().optimize(&observations, &params)?;
            json!({
                "elasticityNote": outcome.elasticity_interpretation.description(),
                "outcome": outcome,
            })
        }
        Commands::Demo { days, seed } => {
            let today = Utc::now().date_naive();
            let start = today
                .checked_sub_days(chrono::Days::new(days as u64))
                .context("history start date out of range")?;
            let observations = generate_history(start, days, 1_000.0, 0.08, seed)?;
            info!(days, seed, "forecasting synthetic history");

            let outcome =
                ForecastEngine::new().forecast_from(&observations, config.default_range, today);
            json!({
                "historyDays": days,
                "range": config.default_range,
                "summary": outcome.summary(),
                "forecast": outcome,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
