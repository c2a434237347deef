//! # Strategy Hub Seed Data
//!
//! The fixed, compiled-in collections that stand in for a real data source:
//! the strategy catalog, the user list shown to admins, the selectable filter
//! options and the pricing tiers.

pub mod history;
pub mod options;
pub mod pricing;
pub mod strategies;
pub mod users;

pub use history::generate_history;
pub use options::{asset_types, risk_levels, strategy_types};
pub use pricing::pricing_tiers;
pub use strategies::{DEFAULT_HISTORY_DAYS, seed_strategies};
pub use users::seed_users;
