//! Wiring shared by every command.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use gigboard_core::config::AppConfig;
use gigboard_core::result::AppResult;
use gigboard_core::types::UserId;
use gigboard_entity::notification::NotificationRecord;
use gigboard_entity::relationship::RelationshipRequest;
use gigboard_notify::{DismissalPersistence, InMemoryPlatform, NotificationFeed};
use gigboard_store::StoreManager;

/// Platform snapshot loaded from a JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlatformFixture {
    #[serde(default)]
    notifications: Vec<NotificationRecord>,
    #[serde(default)]
    requests: Vec<RelationshipRequest>,
}

/// Everything a command needs.
pub struct Context {
    pub feed: NotificationFeed,
    pub dismissals: Arc<DismissalPersistence>,
    pub platform: Arc<InMemoryPlatform>,
}

impl Context {
    /// Build the feed for `user`, seeding the platform from `data` if given.
    pub async fn build(config: &AppConfig, user: &str, data: Option<&str>) -> AppResult<Self> {
        let user_id = UserId::from(user);

        let fixture = match data {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path).await?;
                serde_json::from_str::<PlatformFixture>(&raw)?
            }
            None => PlatformFixture::default(),
        };
        info!(
            notifications = fixture.notifications.len(),
            requests = fixture.requests.len(),
            "Loaded platform snapshot"
        );

        let platform = Arc::new(InMemoryPlatform::new());
        platform
            .seed_notifications(&user_id, fixture.notifications)
            .await;
        platform.seed_requests(&user_id, fixture.requests).await;

        let store = StoreManager::new(&config.dismissal).await?;
        let dismissals = Arc::new(DismissalPersistence::load(store.store(), user_id.as_str()).await?);

        let feed = NotificationFeed::new(
            user_id,
            platform.clone(),
            platform.clone(),
            Arc::clone(&dismissals),
            config,
        )?;
        feed.refresh().await?;

        Ok(Self {
            feed,
            dismissals,
            platform,
        })
    }
}
