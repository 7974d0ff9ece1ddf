//! # gigboard-core
//!
//! Core crate for Gigboard. Contains the collaborator and storage traits,
//! configuration schemas, typed identifiers, and the unified error system
//! shared by the notification lifecycle crates.
//!
//! This crate has **no** internal dependencies on other Gigboard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
