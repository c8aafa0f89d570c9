//! # Shopcast workspace
//!
//! Umbrella package for the workspace. Re-exports the [`shopcast`] facade
//! and the engine crates so downstream users need a single dependency.
//!
//! ## Example
//!
//! ```
//! use shopcast_workspace::price_optimizer::candidate_prices;
//!
//! let grid = candidate_prices(100.0, 0.0, 20.0);
//! assert_eq!(grid.len(), 50);
//! assert_eq!(grid.last(), Some(&100.0));
//! ```

pub use price_optimizer;
pub use sales_forecast;
pub use sales_math;
pub use shopcast;
