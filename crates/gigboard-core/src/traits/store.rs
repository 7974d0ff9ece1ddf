//! Durable key-value storage trait for device-local state.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for local key-value backends (file-backed or in-memory).
///
/// Values are serialized strings (JSON). Unlike a cache, entries never
/// expire, and `set` must not return until the value is durable.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key has never been written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check that the backend is usable.
    async fn health_check(&self) -> AppResult<bool>;
}
