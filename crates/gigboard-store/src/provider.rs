//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use gigboard_core::config::dismissal::DismissalConfig;
use gigboard_core::error::AppError;
use gigboard_core::result::AppResult;
use gigboard_core::traits::store::KeyValueStore;

/// Wraps the configured key-value backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    inner: Arc<dyn KeyValueStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &DismissalConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.backend.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(data_dir = %config.data_dir, "Initializing file state store");
                Arc::new(crate::file::FileStore::new(&config.data_dir).await?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory state store");
                Arc::new(crate::memory::MemoryStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown state store backend: '{other}'. Supported: file, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Shared handle to the backend.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }
}
