//! Service-layer configuration
//!
//! The engines themselves take no configuration. This is what a caller
//! injects around them: defaults for the request parameters and the log
//! level. Values are layered: built-in defaults, then an optional JSON
//! file, then environment overrides. The CLI applies its flags last.

use crate::{Result, ShopcastError};
use price_optimizer::OptimizationGoal;
use sales_forecast::ForecastRange;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the JSON config file when no `--config` flag is given
pub const CONFIG_PATH_ENV: &str = "SHOPCAST_CONFIG";
/// Overrides the configured log level
pub const LOG_LEVEL_ENV: &str = "SHOPCAST_LOG_LEVEL";

/// Defaults applied to forecast and optimization requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub default_range: ForecastRange,
    pub default_goal: OptimizationGoal,
    /// Percent
    pub min_discount: f64,
    /// Percent
    pub max_discount: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_range: ForecastRange::OneMonth,
            default_goal: OptimizationGoal::Profit,
            min_discount: 0.0,
            max_discount: 50.0,
        }
    }
}

impl AnalyticsConfig {
    /// Load the layered configuration.
    ///
    /// `path` wins over `SHOPCAST_CONFIG`; with neither, the defaults are
    /// used before environment overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded analytics config");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    /// Reject discount ranges the optimizer would refuse
    pub fn validate(&self) -> Result<()> {
        let in_range = |d: f64| d.is_finite() && (0.0..100.0).contains(&d);
        if !in_range(self.min_discount) || !in_range(self.max_discount) {
            return Err(ShopcastError::Config(format!(
                "discounts must lie in [0, 100), got {} and {}",
                self.min_discount, self.max_discount
            )));
        }
        if self.min_discount > self.max_discount {
            return Err(ShopcastError::Config(format!(
                "min_discount {} exceeds max_discount {}",
                self.min_discount, self.max_discount
            )));
        }
        Ok(())
    }
}
