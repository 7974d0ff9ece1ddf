//! Core traits implemented by the storage crate.

pub mod store;

pub use store::KeyValueStore;
