//! UI-facing notification feed.
//!
//! Holds the last platform snapshot with a local read overlay, folds it into
//! the display list on demand, and publishes a [`FeedSnapshot`] through a
//! watch channel after every change.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use gigboard_core::config::AppConfig;
use gigboard_core::result::AppResult;
use gigboard_core::types::{NotificationId, RequesterId, UserId};
use gigboard_entity::notification::NotificationRecord;
use gigboard_entity::relationship::RelationshipRequest;
use gigboard_entity::status::AccountStatus;

use crate::bulk::{BulkActionCoordinator, BulkSummary};
use crate::dismissal::{BannerPolicy, DismissalKey, DismissalPersistence};
use crate::grouping::{DisplayItem, GroupingEngine};
use crate::platform::{NotificationSource, RelationshipSource};
use crate::read_state::{OpenOutcome, PendingReads, ReadStateTracker};

use super::filter::FeedFilter;
use super::snapshot::FeedSnapshot;

#[derive(Debug, Default)]
struct FeedState {
    records: Vec<NotificationRecord>,
    pending: PendingReads,
    version: u64,
}

impl FeedState {
    fn view(&self) -> Vec<NotificationRecord> {
        self.pending.apply(&self.records)
    }

    /// Whether `id` is known locally and still unread after the overlay.
    fn shows_unread(&self, id: &NotificationId) -> bool {
        self.records
            .iter()
            .any(|r| &r.id == id && r.is_unread() && !self.pending.reads_as_read(id))
    }
}

/// The notification lifecycle for one signed-in user.
#[derive(Debug)]
pub struct NotificationFeed {
    user_id: UserId,
    notifications: Arc<dyn NotificationSource>,
    relationships: Arc<dyn RelationshipSource>,
    engine: GroupingEngine,
    tracker: ReadStateTracker,
    bulk: BulkActionCoordinator<RequesterId>,
    banners: BannerPolicy,
    state: RwLock<FeedState>,
    snapshots: watch::Sender<FeedSnapshot>,
}

impl NotificationFeed {
    /// Wire a feed for `user_id`.
    ///
    /// Nothing is fetched until [`NotificationFeed::refresh`] is called.
    pub fn new(
        user_id: UserId,
        notifications: Arc<dyn NotificationSource>,
        relationships: Arc<dyn RelationshipSource>,
        dismissals: Arc<DismissalPersistence>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        let engine = GroupingEngine::from_config(&config.notifications)?;
        let tracker = ReadStateTracker::new(
            Arc::clone(&notifications),
            user_id.clone(),
            config.read_state.clone(),
        );
        let (snapshots, _) = watch::channel(FeedSnapshot::default());

        Ok(Self {
            user_id,
            notifications,
            relationships,
            engine,
            tracker,
            bulk: BulkActionCoordinator::new(),
            banners: BannerPolicy::new(dismissals),
            state: RwLock::new(FeedState::default()),
            snapshots,
        })
    }

    /// The user this feed belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshots.subscribe()
    }

    /// Fetch the user's records from the platform and publish them.
    ///
    /// Confirmed reads the fresh records already reflect are dropped from
    /// the overlay; in-flight reads stay applied.
    pub async fn refresh(&self) -> AppResult<FeedSnapshot> {
        let records = self.notifications.fetch_notifications(&self.user_id).await?;
        debug!(user_id = %self.user_id, records = records.len(), "Fetched notifications");

        let snapshot = self.update(|state| {
            state.pending.reconcile(&records);
            state.records = records;
        });
        Ok(snapshot)
    }

    /// Display list for `filter`. The filter applies to records before grouping.
    pub fn get_display_feed(&self, filter: FeedFilter) -> Vec<DisplayItem> {
        let records = filter.apply(&self.read().view());
        self.engine.group(&records)
    }

    /// Unread records after the local overlay.
    pub fn get_unread_count(&self) -> usize {
        ReadStateTracker::unread_count(&self.read().view())
    }

    /// Mark one record read, showing it read while the call is in flight.
    ///
    /// On failure the record reverts to unread and the error is returned.
    pub async fn request_mark_read(&self, id: &NotificationId) -> AppResult<()> {
        let begun = self.begin_reads(std::slice::from_ref(id));
        let result = self.tracker.mark_as_read(id).await;
        self.settle_reads(&begun, &result);
        result
    }

    /// Mark every record read with one platform call.
    ///
    /// All unread records show read immediately and revert together if the
    /// call fails.
    pub async fn request_mark_all_read(&self) -> AppResult<()> {
        let unread: Vec<NotificationId> = self
            .read()
            .view()
            .into_iter()
            .filter(NotificationRecord::is_unread)
            .map(|r| r.id)
            .collect();

        let begun = self.begin_reads(&unread);
        let result = self.tracker.mark_all_as_read().await;
        self.settle_reads(&begun, &result);
        result
    }

    /// Open a feed entry.
    ///
    /// A single unread record is marked read through the overlay; a larger
    /// group is returned for the detail view without marking anything.
    pub async fn open_item(&self, item: &DisplayItem) -> AppResult<OpenOutcome> {
        let target = match item.records() {
            [single] if self.read().shows_unread(&single.id) => vec![single.id.clone()],
            _ => Vec::new(),
        };

        let begun = self.begin_reads(&target);
        let result = self.tracker.open(item).await;
        self.settle_reads(&begun, &result);
        result
    }

    /// Follow requests waiting for a decision.
    pub async fn pending_requests(&self) -> AppResult<Vec<RelationshipRequest>> {
        self.relationships.fetch_pending_requests(&self.user_id).await
    }

    /// Selection state and controls for bulk actions.
    pub fn selection(&self) -> &BulkActionCoordinator<RequesterId> {
        &self.bulk
    }

    /// Accept each request in `ids`, one at a time.
    pub async fn request_bulk_accept(&self, ids: Vec<RequesterId>) -> AppResult<BulkSummary<RequesterId>> {
        self.bulk
            .execute(ids, |id| async move {
                self.relationships.accept_request(&self.user_id, &id).await
            })
            .await
    }

    /// Decline each request in `ids`, one at a time.
    pub async fn request_bulk_decline(&self, ids: Vec<RequesterId>) -> AppResult<BulkSummary<RequesterId>> {
        self.bulk
            .execute(ids, |id| async move {
                self.relationships.decline_request(&self.user_id, &id).await
            })
            .await
    }

    /// Accept every selected request.
    pub async fn accept_selected(&self) -> AppResult<BulkSummary<RequesterId>> {
        self.request_bulk_accept(self.bulk.selection()).await
    }

    /// Decline every selected request.
    pub async fn decline_selected(&self) -> AppResult<BulkSummary<RequesterId>> {
        self.request_bulk_decline(self.bulk.selection()).await
    }

    /// Whether `status` is a warning the user has dismissed.
    ///
    /// Always `false` for other severities; they cannot be dismissed.
    pub fn is_warning_dismissed(&self, status: &AccountStatus) -> bool {
        status.severity.is_dismissible()
            && self
                .banners
                .persistence()
                .is_dismissed(&DismissalKey::for_status(status))
    }

    /// Close the banner for `status`: durably for a warning, for this
    /// session otherwise.
    pub async fn dismiss_warning(&self, status: &AccountStatus) -> AppResult<()> {
        self.banners.close(status).await
    }

    /// Whether the banner for `status` is currently shown.
    pub fn should_show_banner(&self, status: &AccountStatus) -> bool {
        self.banners.should_show(status)
    }

    fn begin_reads(&self, ids: &[NotificationId]) -> Vec<NotificationId> {
        let mut begun = Vec::new();
        self.update(|state| {
            let unread: Vec<&NotificationId> = ids.iter().filter(|id| state.shows_unread(id)).collect();
            begun = state.pending.begin_many(unread);
        });
        begun
    }

    fn settle_reads<T>(&self, begun: &[NotificationId], result: &AppResult<T>) {
        if begun.is_empty() {
            return;
        }
        match result {
            Ok(_) => {
                self.update(|state| state.pending.confirm_many(begun));
            }
            Err(e) => {
                warn!(
                    user_id = %self.user_id,
                    reverted = begun.len(),
                    error = %e,
                    "Read mutation failed, restoring unread state"
                );
                self.update(|state| state.pending.rollback_many(begun));
            }
        }
    }

    /// Apply `change`, bump the version, and publish the new snapshot.
    fn update(&self, change: impl FnOnce(&mut FeedState)) -> FeedSnapshot {
        let snapshot = {
            let mut state = self.write();
            change(&mut state);
            state.version += 1;
            let records = state.view();
            FeedSnapshot {
                unread_count: ReadStateTracker::unread_count(&records),
                records,
                version: state.version,
            }
        };

        info!(
            user_id = %self.user_id,
            version = snapshot.version,
            unread = snapshot.unread_count,
            "Feed updated"
        );
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    fn read(&self) -> RwLockReadGuard<'_, FeedState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FeedState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{InMemoryPlatform, PlatformCall};
    use gigboard_core::config::notifications::ReadStateConfig;
    use gigboard_entity::notification::NotificationType;
    use gigboard_store::memory::MemoryStore;

    fn user() -> UserId {
        UserId::from("u1")
    }

    fn rec(id: &str, kind: NotificationType, at: i64) -> NotificationRecord {
        NotificationRecord::new(id, kind, "t", "m", at)
    }

    async fn feed(records: Vec<NotificationRecord>) -> (Arc<InMemoryPlatform>, NotificationFeed) {
        let platform = Arc::new(InMemoryPlatform::new());
        platform.seed_notifications(&user(), records).await;
        let dismissals = DismissalPersistence::load(Arc::new(MemoryStore::new()), "u1")
            .await
            .unwrap();
        let config = AppConfig {
            read_state: ReadStateConfig {
                max_retries: 0,
                retry_delay_ms: 0,
            },
            ..AppConfig::default()
        };
        let feed = NotificationFeed::new(
            user(),
            platform.clone(),
            platform.clone(),
            Arc::new(dismissals),
            &config,
        )
        .unwrap();
        feed.refresh().await.unwrap();
        (platform, feed)
    }

    #[tokio::test]
    async fn test_refresh_publishes() {
        let (_platform, feed) = feed(vec![
            rec("a", NotificationType::NewMessage, 1),
            rec("b", NotificationType::NewMessage, 2).read(),
        ])
        .await;
        let rx = feed.subscribe();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.unread_count, 1);
        assert_eq!(feed.get_unread_count(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_confirms() {
        let (platform, feed) = feed(vec![rec("a", NotificationType::NewMessage, 1)]).await;
        feed.request_mark_read(&NotificationId::from("a")).await.unwrap();
        assert_eq!(feed.get_unread_count(), 0);

        feed.refresh().await.unwrap();
        assert_eq!(feed.get_unread_count(), 0);
        assert!(platform.calls().contains(&PlatformCall::MarkRead(NotificationId::from("a"))));
    }

    #[tokio::test]
    async fn test_mark_read_failure_rolls_back() {
        let (platform, feed) = feed(vec![rec("a", NotificationType::NewMessage, 1)]).await;
        platform.fail_mark_read(1);
        let mut rx = feed.subscribe();
        rx.mark_unchanged();

        assert!(feed.request_mark_read(&NotificationId::from("a")).await.is_err());
        assert_eq!(feed.get_unread_count(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().unread_count, 1);
    }

    #[tokio::test]
    async fn test_mark_all_failure_rolls_back_everything() {
        let (platform, feed) = feed(vec![
            rec("a", NotificationType::NewMessage, 1),
            rec("b", NotificationType::GigInvite, 2),
        ])
        .await;
        platform.fail_mark_all(1);
        assert!(feed.request_mark_all_read().await.is_err());
        assert_eq!(feed.get_unread_count(), 2);

        feed.request_mark_all_read().await.unwrap();
        assert_eq!(feed.get_unread_count(), 0);
    }

    #[tokio::test]
    async fn test_unread_filter_before_grouping() {
        let (_platform, feed) = feed(vec![
            rec("v1", NotificationType::ProfileView, 1_000),
            rec("v2", NotificationType::ProfileView, 2_000).read(),
            rec("v3", NotificationType::ProfileView, 3_000),
        ])
        .await;

        let all = feed.get_display_feed(FeedFilter::All);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].count(), 3);

        let unread = feed.get_display_feed(FeedFilter::Unread);
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].count(), 2);
    }

    #[tokio::test]
    async fn test_open_single_record_updates_overlay() {
        let (_platform, feed) = feed(vec![rec("a", NotificationType::NewReview, 1)]).await;
        let item = feed.get_display_feed(FeedFilter::All).remove(0);
        let outcome = feed.open_item(&item).await.unwrap();
        assert_eq!(outcome, OpenOutcome::MarkedRead(NotificationId::from("a")));
        assert_eq!(feed.get_unread_count(), 0);
    }

    #[tokio::test]
    async fn test_warning_dismissal() {
        let (_platform, feed) = feed(vec![]).await;
        let warning = AccountStatus::warning("Late cancellation", 5);
        assert!(!feed.is_warning_dismissed(&warning));
        feed.dismiss_warning(&warning).await.unwrap();
        assert!(feed.is_warning_dismissed(&warning));
        assert!(!feed.should_show_banner(&warning));
    }
}
