//! Status banner visibility.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;

use gigboard_core::result::AppResult;
use gigboard_core::types::TimestampMs;
use gigboard_entity::status::{AccountStatus, StatusSeverity};

use super::key::DismissalKey;
use super::persistence::DismissalPersistence;

/// Identity of a banner hidden for the current session only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionBanner {
    severity: StatusSeverity,
    reason: String,
    created_at: TimestampMs,
}

impl From<&AccountStatus> for SessionBanner {
    fn from(status: &AccountStatus) -> Self {
        Self {
            severity: status.severity,
            reason: status.reason.clone(),
            created_at: status.created_at,
        }
    }
}

/// Decides whether a status banner is shown and what closing it does.
///
/// Warnings are dismissed durably. Every other severity can only be hidden
/// for the lifetime of this policy; the persisted set is never consulted for
/// them, so they reappear on the next load.
#[derive(Debug)]
pub struct BannerPolicy {
    persistence: Arc<DismissalPersistence>,
    hidden: Mutex<HashSet<SessionBanner>>,
}

impl BannerPolicy {
    /// Create a policy backed by `persistence` with nothing hidden yet.
    pub fn new(persistence: Arc<DismissalPersistence>) -> Self {
        Self {
            persistence,
            hidden: Mutex::new(HashSet::new()),
        }
    }

    /// Whether the banner for `status` should be shown.
    pub fn should_show(&self, status: &AccountStatus) -> bool {
        if status.severity.is_dismissible() {
            return !self.persistence.is_dismissed(&DismissalKey::for_status(status));
        }
        !self
            .hidden
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&SessionBanner::from(status))
    }

    /// Close the banner for `status`.
    pub async fn close(&self, status: &AccountStatus) -> AppResult<()> {
        if status.severity.is_dismissible() {
            return self
                .persistence
                .dismiss(&DismissalKey::for_status(status))
                .await;
        }

        debug!(severity = %status.severity, "Hiding banner for this session");
        self.hidden
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(SessionBanner::from(status));
        Ok(())
    }

    /// Underlying persistence.
    pub fn persistence(&self) -> &Arc<DismissalPersistence> {
        &self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigboard_core::traits::store::KeyValueStore;
    use gigboard_store::memory::MemoryStore;

    async fn policy(store: Arc<dyn KeyValueStore>) -> BannerPolicy {
        let persistence = DismissalPersistence::load(store, "u1").await.unwrap();
        BannerPolicy::new(Arc::new(persistence))
    }

    #[tokio::test]
    async fn test_warning_close_persists() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let warning = AccountStatus::warning("Late cancellation", 5);

        let first = policy(Arc::clone(&store)).await;
        assert!(first.should_show(&warning));
        first.close(&warning).await.unwrap();
        assert!(!first.should_show(&warning));

        let next_session = policy(store).await;
        assert!(!next_session.should_show(&warning));
    }

    #[tokio::test]
    async fn test_ban_close_is_session_only() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let ban = AccountStatus::new(StatusSeverity::Ban, "Fraud", 7);

        let first = policy(Arc::clone(&store)).await;
        first.close(&ban).await.unwrap();
        assert!(!first.should_show(&ban));
        assert!(first.persistence().is_empty());

        let next_session = policy(store).await;
        assert!(next_session.should_show(&ban));
    }

    #[tokio::test]
    async fn test_high_severity_ignores_matching_dismissal() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let policy = policy(store).await;
        let suspension = AccountStatus::new(StatusSeverity::Suspension, "Spam", 3);

        // Same reason and timestamp as the suspension.
        policy
            .persistence()
            .dismiss(&DismissalKey::derive("Spam", 3))
            .await
            .unwrap();

        assert!(policy.should_show(&suspension));
    }
}
