//! # gigboard-store
//!
//! Key-value backends for Gigboard device-local state. Supports two modes:
//!
//! - **file**: one file per key under a data directory, written atomically
//!   and synced before the write returns
//! - **memory**: process-local map backed by [dashmap](https://crates.io/crates/dashmap),
//!   used by tests and ephemeral sessions
//!
//! The backend is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
