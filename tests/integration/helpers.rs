//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use gigboard_core::config::AppConfig;
use gigboard_core::config::dismissal::DismissalConfig;
use gigboard_core::types::UserId;
use gigboard_entity::notification::{NotificationRecord, NotificationType};
use gigboard_entity::relationship::RelationshipRequest;
use gigboard_notify::{DismissalPersistence, InMemoryPlatform, NotificationFeed};
use gigboard_store::StoreManager;

/// Test application context
pub struct TestApp {
    /// Platform double shared by the feed
    pub platform: Arc<InMemoryPlatform>,
    /// Feed under test
    pub feed: NotificationFeed,
    /// Application config
    pub config: AppConfig,
    /// Data directory of the file store
    pub data_dir: PathBuf,
    /// Owns the data directory when this app created it
    _temp: Option<TempDir>,
}

impl TestApp {
    /// Create a new test application with a fresh file store
    pub async fn new() -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let mut app = Self::with_data_dir(temp.path().to_path_buf()).await;
        app._temp = Some(temp);
        app
    }

    /// Create a test application over an existing data directory.
    ///
    /// The directory stays owned by whoever created it.
    pub async fn with_data_dir(data_dir: PathBuf) -> Self {
        let mut config = AppConfig::default();
        config.dismissal = DismissalConfig {
            backend: "file".to_string(),
            data_dir: data_dir.to_string_lossy().into_owned(),
        };
        config.read_state.retry_delay_ms = 0;
        config.validate().expect("Test config must be valid");

        let store = StoreManager::new(&config.dismissal)
            .await
            .expect("Failed to init state store");
        let dismissals = DismissalPersistence::load(store.store(), Self::user().as_str())
            .await
            .expect("Failed to load dismissals");

        let platform = Arc::new(InMemoryPlatform::new());
        let feed = NotificationFeed::new(
            Self::user(),
            platform.clone(),
            platform.clone(),
            Arc::new(dismissals),
            &config,
        )
        .expect("Failed to build feed");

        Self {
            platform,
            feed,
            config,
            data_dir,
            _temp: None,
        }
    }

    /// The signed-in user
    pub fn user() -> UserId {
        UserId::from("musician_1")
    }

    /// Seed records and refresh the feed
    pub async fn seed(&self, records: Vec<NotificationRecord>) {
        self.platform.seed_notifications(&Self::user(), records).await;
        self.feed.refresh().await.expect("Refresh failed");
    }

    /// Seed pending follow requests
    pub async fn seed_requests(&self, requester_ids: &[&str]) {
        let requests = requester_ids
            .iter()
            .enumerate()
            .map(|(i, id)| RelationshipRequest::new(*id, format!("Requester {id}"), i as i64))
            .collect();
        self.platform.seed_requests(&Self::user(), requests).await;
    }
}

/// Build an unread record
pub fn record(id: &str, kind: NotificationType, created_at: i64) -> NotificationRecord {
    NotificationRecord::new(id, kind, format!("{kind} {id}"), "body", created_at)
}
