//! # Strategy Hub Dashboards
//!
//! The view controllers behind the two dashboards. A controller owns its copy of
//! the collection, the current filter criteria and the selected record; it asks
//! the `analytics::QueryEngine` for everything it shows.
//!
//! ## Public API
//!
//! - `AccessRule`, `check_access`, `enforce`: per-view access preconditions.
//! - `AdminDashboard`: user management with search, deletion and aggregates.
//! - `UserDashboard`: the strategy explorer with filters and a selected strategy.
//! - `DashboardError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod admin;
pub mod error;
pub mod guard;
pub mod user;

// Re-export the key components to create a clean, public-facing API.
pub use admin::AdminDashboard;
pub use error::DashboardError;
pub use guard::{AccessRule, check_access, enforce};
pub use user::{UserDashboard, default_subscriptions};
