//! # Strategy Hub Analytics
//!
//! The collection query engine: filtering of in-memory strategy and user
//! collections, plus the aggregate statistics shown on the dashboards.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate depends only on `core-types`. Every operation is a
//!   function of its inputs; nothing is cached and nothing is mutated.
//! - **One Engine, Two Configurations:** `Filter<T>` is generic over the record type
//!   and is parameterised with field-accessor functions. The `QueryEngine` wires it
//!   up once for users and once for strategies.
//! - **Borrowed Results:** Filters return `Vec<&T>` in input order, so a result can
//!   never contain a record that is not in the input, nor the same record twice.
//!
//! ## Public API
//!
//! - `Filter`: the generic AND-combined predicate set.
//! - `UserCriteria`, `StrategyCriteria`: the per-view filter state.
//! - `QueryEngine`: the configured filters, lookups and aggregates.
//! - `DashboardStats`, `HistorySummary`: the derived reports.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod criteria;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use criteria::{StrategyCriteria, UserCriteria};
pub use engine::QueryEngine;
pub use error::AnalyticsError;
pub use filter::Filter;
pub use report::{DashboardStats, HistorySummary};
