//! # gigboard-entity
//!
//! Domain models for Gigboard. Every struct in this crate is a value
//! supplied by the data platform: notification records, pending follow
//! requests, and account status banners. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod notification;
pub mod relationship;
pub mod status;
