//! # Strategy Hub Events
//!
//! This crate defines the side-channel messages the core emits towards its
//! presentation layer: user-facing notifications and navigation redirects.
//!
//! It is a leaf crate with no workspace dependencies and provides the definitive
//! language for everything the core "tells" a front end without expecting an answer.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{Notification, Route, Severity, UiEvent};
