//! # Strategy Hub Session
//!
//! The session store: who is logged in, and how that changes.
//!
//! ## Architectural Principles
//!
//! - **No Ambient State:** A `SessionStore` is an ordinary value. Views receive the
//!   store (or an immutable `SessionUser` read from it) through their constructors.
//! - **Replaceable Identity Provider:** Credential checks go through the
//!   `Authenticator` trait and account creation through `Registrar`. The
//!   `MockAuthenticator` implements both over a fixed credential list.
//! - **Injected Side Channels:** Persistence goes through a `KeyValueStore` and
//!   user-facing outcomes through a `NotificationSink`.
//!
//! ## Public API
//!
//! - `SessionStore`: authenticate, register, restore, clear.
//! - `Authenticator`, `Registrar`, `IdentityProvider`, `MockAuthenticator`, `Credential`.
//! - `SessionError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod authenticator;
pub mod error;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use authenticator::{Authenticator, Credential, IdentityProvider, MockAuthenticator, Registrar};
pub use error::SessionError;
pub use store::{SESSION_KEY, SessionStore};
