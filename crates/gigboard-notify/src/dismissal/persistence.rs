//! Durable set of dismissed warning keys.
//!
//! One `DismissalPersistence` owns the set for one user/device identity. It
//! is loaded explicitly, written through on every change, and never pruned
//! except by [`DismissalPersistence::clear`].

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use gigboard_core::result::AppResult;
use gigboard_core::traits::store::KeyValueStore;
use gigboard_entity::status::AccountStatus;
use gigboard_store::keys;

use super::key::DismissalKey;

/// Layout version written by this build.
pub const BLOB_VERSION: u32 = 1;

/// Persisted form of the dismissal set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissalBlob {
    /// Layout version.
    pub version: u32,
    /// Dismissed keys.
    pub keys: BTreeSet<String>,
    /// When the blob was last written.
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Owns the dismissal set and its storage handle.
#[derive(Debug)]
pub struct DismissalPersistence {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    keys: RwLock<BTreeSet<String>>,
    /// Serializes writers so each persisted blob reflects every prior dismissal.
    write_lock: Mutex<()>,
}

impl DismissalPersistence {
    /// Load the dismissal set for `identity` from `store`.
    ///
    /// A missing entry is an empty set. A blob written by a newer layout, or
    /// one that does not parse, is logged and treated as empty; it is
    /// replaced on the next write. Storage I/O errors are returned.
    pub async fn load(store: Arc<dyn KeyValueStore>, identity: &str) -> AppResult<Self> {
        let storage_key = keys::dismissals(identity);
        let keys = match store.get(&storage_key).await? {
            Some(raw) => decode(&storage_key, &raw),
            None => BTreeSet::new(),
        };

        info!(key = %storage_key, dismissed = keys.len(), "Loaded dismissal set");

        Ok(Self {
            store,
            storage_key,
            keys: RwLock::new(keys),
            write_lock: Mutex::new(()),
        })
    }

    /// Derive the key for a warning.
    pub fn key(status: &AccountStatus) -> DismissalKey {
        DismissalKey::for_status(status)
    }

    /// Whether `key` has been dismissed.
    pub fn is_dismissed(&self, key: &DismissalKey) -> bool {
        self.read().contains(key.as_str())
    }

    /// Record `key` as dismissed. Returns once the set is durable.
    ///
    /// Dismissing a key that is already present changes nothing and skips
    /// the write.
    pub async fn dismiss(&self, key: &DismissalKey) -> AppResult<()> {
        let _writer = self.write_lock.lock().await;

        let mut next = self.read().clone();
        if !next.insert(key.as_str().to_string()) {
            debug!(key = %key, "Warning already dismissed");
            return Ok(());
        }

        self.persist(&next).await?;
        *self.write() = next;

        info!(key = %key, "Warning dismissed");
        Ok(())
    }

    /// Empty the set and persist the empty set.
    pub async fn clear(&self) -> AppResult<()> {
        let _writer = self.write_lock.lock().await;

        let empty = BTreeSet::new();
        self.persist(&empty).await?;
        let dropped = std::mem::replace(&mut *self.write(), empty).len();

        info!(key = %self.storage_key, dropped = dropped, "Dismissal set cleared");
        Ok(())
    }

    /// Number of dismissed keys.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing has been dismissed.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Dismissed keys in sorted order.
    pub fn keys(&self) -> Vec<DismissalKey> {
        self.read().iter().cloned().map(DismissalKey::from_raw).collect()
    }

    /// Storage entry backing this set.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    async fn persist(&self, keys: &BTreeSet<String>) -> AppResult<()> {
        let blob = DismissalBlob {
            version: BLOB_VERSION,
            keys: keys.clone(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&blob)?;
        self.store.set(&self.storage_key, &json).await
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.keys.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.keys.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn decode(storage_key: &str, raw: &str) -> BTreeSet<String> {
    match serde_json::from_str::<VersionProbe>(raw) {
        Ok(probe) if probe.version == BLOB_VERSION => {}
        Ok(probe) => {
            warn!(
                key = %storage_key,
                found = probe.version,
                supported = BLOB_VERSION,
                "Unsupported dismissal blob version, starting empty"
            );
            return BTreeSet::new();
        }
        Err(e) => {
            warn!(key = %storage_key, error = %e, "Corrupt dismissal blob, starting empty");
            return BTreeSet::new();
        }
    }

    match serde_json::from_str::<DismissalBlob>(raw) {
        Ok(blob) => blob.keys,
        Err(e) => {
            warn!(key = %storage_key, error = %e, "Corrupt dismissal blob, starting empty");
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigboard_store::memory::MemoryStore;

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_missing_entry_loads_empty() {
        let persistence = DismissalPersistence::load(memory(), "u1").await.unwrap();
        assert!(persistence.is_empty());
        assert_eq!(persistence.storage_key(), "gigboard:dismissals:u1");
    }

    #[tokio::test]
    async fn test_dismiss_is_idempotent() {
        let store = memory();
        let persistence = DismissalPersistence::load(Arc::clone(&store), "u1").await.unwrap();
        let key = DismissalKey::derive("No show", 10);

        persistence.dismiss(&key).await.unwrap();
        persistence.dismiss(&key).await.unwrap();

        assert!(persistence.is_dismissed(&key));
        assert_eq!(persistence.len(), 1);

        let raw = store.get("gigboard:dismissals:u1").await.unwrap().unwrap();
        let blob: DismissalBlob = serde_json::from_str(&raw).unwrap();
        assert_eq!(blob.version, BLOB_VERSION);
        assert_eq!(blob.keys.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_sees_dismissals() {
        let store = memory();
        let key = DismissalKey::derive("Late cancellation", 99);
        {
            let persistence = DismissalPersistence::load(Arc::clone(&store), "u1").await.unwrap();
            persistence.dismiss(&key).await.unwrap();
        }
        let reloaded = DismissalPersistence::load(Arc::clone(&store), "u1").await.unwrap();
        assert!(reloaded.is_dismissed(&key));

        let other = DismissalPersistence::load(store, "u2").await.unwrap();
        assert!(!other.is_dismissed(&key));
    }

    #[tokio::test]
    async fn test_newer_version_loads_empty() {
        let store = memory();
        store
            .set(
                "gigboard:dismissals:u1",
                r#"{"version":2,"entries":{"warning-x-1":"2026-01-01T00:00:00Z"}}"#,
            )
            .await
            .unwrap();
        let persistence = DismissalPersistence::load(store, "u1").await.unwrap();
        assert!(persistence.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty_and_is_replaced() {
        let store = memory();
        store.set("gigboard:dismissals:u1", "{not json").await.unwrap();
        let persistence = DismissalPersistence::load(Arc::clone(&store), "u1").await.unwrap();
        assert!(persistence.is_empty());

        let key = DismissalKey::derive("x", 1);
        persistence.dismiss(&key).await.unwrap();
        let raw = store.get("gigboard:dismissals:u1").await.unwrap().unwrap();
        assert!(serde_json::from_str::<DismissalBlob>(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_clear_persists() {
        let store = memory();
        let persistence = DismissalPersistence::load(Arc::clone(&store), "u1").await.unwrap();
        persistence.dismiss(&DismissalKey::derive("a", 1)).await.unwrap();
        persistence.dismiss(&DismissalKey::derive("b", 2)).await.unwrap();
        persistence.clear().await.unwrap();
        assert!(persistence.is_empty());

        let reloaded = DismissalPersistence::load(store, "u1").await.unwrap();
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let persistence = DismissalPersistence::load(memory(), "u1").await.unwrap();
        persistence.dismiss(&DismissalKey::derive("b", 2)).await.unwrap();
        persistence.dismiss(&DismissalKey::derive("a", 1)).await.unwrap();
        let keys: Vec<String> = persistence.keys().into_iter().map(DismissalKey::into_inner).collect();
        assert_eq!(keys, vec!["warning-a-1", "warning-b-2"]);
    }
}
