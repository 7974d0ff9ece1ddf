//! File-backed durable backend.

pub mod store;

pub use store::FileStore;
