//! # Strategy Hub Core Types
//!
//! The foundational data structures shared by every other crate in the workspace.
//! This crate has no knowledge of storage, presentation or transport; it only
//! defines what a strategy, a user and a session look like.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{RiskTier, Role, UserStatus};
pub use error::CoreError;
pub use structs::{
    HistoricalPoint, Performance, PricingTier, SelectOption, SessionUser, Strategy, User,
};
