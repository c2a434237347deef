//! # Strategy Hub Storage
//!
//! Client-local persistent storage: a flat namespace of named string slots, the
//! equivalent of a browser's local storage. The session store keeps its record in
//! a single slot; nothing else in the system persists.
//!
//! ## Public API
//!
//! - `KeyValueStore`: the storage capability injected into the session store.
//! - `MemoryStore`: a process-local store, lost on exit.
//! - `FileStore`: one file per key inside a directory, survives restarts.
//! - `StorageError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::StorageError;
pub use store::{FileStore, KeyValueStore, MemoryStore};
