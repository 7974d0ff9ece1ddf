//! In-memory platform for single-process use and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gigboard_core::error::{AppError, ErrorKind};
use gigboard_core::result::AppResult;
use gigboard_core::types::{NotificationId, RequesterId, UserId};
use gigboard_entity::notification::NotificationRecord;
use gigboard_entity::relationship::RelationshipRequest;

use super::{NotificationSource, RelationshipSource};

/// A call received by the platform, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    /// `fetch_notifications`
    FetchNotifications,
    /// `mark_notification_read`
    MarkRead(NotificationId),
    /// `mark_all_notifications_read`
    MarkAllRead,
    /// `fetch_pending_requests`
    FetchPending,
    /// `accept_request`
    Accept(RequesterId),
    /// `decline_request`
    Decline(RequesterId),
}

#[derive(Debug, Default)]
struct Faults {
    /// Remaining transient failures for `mark_notification_read`.
    mark_read: u32,
    /// Remaining transient failures for `mark_all_notifications_read`.
    mark_all: u32,
    /// Requesters whose accept/decline always fails with the given kind.
    requesters: HashMap<RequesterId, ErrorKind>,
}

/// Platform state held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    notifications: RwLock<HashMap<UserId, Vec<NotificationRecord>>>,
    requests: RwLock<HashMap<UserId, Vec<RelationshipRequest>>>,
    followers: RwLock<HashMap<UserId, Vec<RequesterId>>>,
    faults: Mutex<Faults>,
    calls: Mutex<Vec<PlatformCall>>,
}

impl InMemoryPlatform {
    /// Create an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's notification records.
    pub async fn seed_notifications(&self, user_id: &UserId, records: Vec<NotificationRecord>) {
        self.notifications
            .write()
            .await
            .insert(user_id.clone(), records);
    }

    /// Replace the user's pending follow requests.
    pub async fn seed_requests(&self, user_id: &UserId, requests: Vec<RelationshipRequest>) {
        self.requests.write().await.insert(user_id.clone(), requests);
    }

    /// Users accepted as followers of `user_id`, in acceptance order.
    pub async fn followers(&self, user_id: &UserId) -> Vec<RequesterId> {
        self.followers
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next `times` single mark-as-read calls fail transiently.
    pub fn fail_mark_read(&self, times: u32) {
        self.faults().mark_read = times;
    }

    /// Make the next `times` mark-all calls fail transiently.
    pub fn fail_mark_all(&self, times: u32) {
        self.faults().mark_all = times;
    }

    /// Make every accept/decline for `requester_id` fail with `kind`.
    pub fn fail_requester(&self, requester_id: impl Into<RequesterId>, kind: ErrorKind) {
        self.faults().requesters.insert(requester_id.into(), kind);
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn faults(&self) -> std::sync::MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: PlatformCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Consume one transient failure from a counter, if any remain.
    fn take_fault(counter: &mut u32) -> bool {
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }

    fn requester_fault(&self, requester_id: &RequesterId) -> Option<AppError> {
        self.faults()
            .requesters
            .get(requester_id)
            .map(|kind| AppError::new(*kind, format!("Injected failure for requester {requester_id}")))
    }

    /// Remove a pending request, failing with `NotFound` if it is not pending.
    async fn resolve_request(&self, user_id: &UserId, requester_id: &RequesterId) -> AppResult<()> {
        let mut requests = self.requests.write().await;
        let pending = requests.entry(user_id.clone()).or_default();
        let before = pending.len();
        pending.retain(|r| &r.requester_id != requester_id);
        if pending.len() == before {
            return Err(AppError::not_found(format!(
                "No pending request from {requester_id}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSource for InMemoryPlatform {
    async fn fetch_notifications(&self, user_id: &UserId) -> AppResult<Vec<NotificationRecord>> {
        self.record(PlatformCall::FetchNotifications);
        Ok(self
            .notifications
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn mark_notification_read(&self, user_id: &UserId, id: &NotificationId) -> AppResult<()> {
        self.record(PlatformCall::MarkRead(id.clone()));
        if Self::take_fault(&mut self.faults().mark_read) {
            return Err(AppError::transient("Injected mark-read timeout"));
        }

        let mut notifications = self.notifications.write().await;
        let record = notifications
            .get_mut(user_id)
            .and_then(|records| records.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
        record.is_read = true;
        Ok(())
    }

    async fn mark_all_notifications_read(&self, user_id: &UserId) -> AppResult<()> {
        self.record(PlatformCall::MarkAllRead);
        if Self::take_fault(&mut self.faults().mark_all) {
            return Err(AppError::transient("Injected mark-all timeout"));
        }

        if let Some(records) = self.notifications.write().await.get_mut(user_id) {
            for record in records.iter_mut() {
                record.is_read = true;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RelationshipSource for InMemoryPlatform {
    async fn fetch_pending_requests(&self, user_id: &UserId) -> AppResult<Vec<RelationshipRequest>> {
        self.record(PlatformCall::FetchPending);
        Ok(self
            .requests
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn accept_request(&self, user_id: &UserId, requester_id: &RequesterId) -> AppResult<()> {
        self.record(PlatformCall::Accept(requester_id.clone()));
        if let Some(err) = self.requester_fault(requester_id) {
            return Err(err);
        }
        self.resolve_request(user_id, requester_id).await?;
        self.followers
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(requester_id.clone());
        Ok(())
    }

    async fn decline_request(&self, user_id: &UserId, requester_id: &RequesterId) -> AppResult<()> {
        self.record(PlatformCall::Decline(requester_id.clone()));
        if let Some(err) = self.requester_fault(requester_id) {
            return Err(err);
        }
        self.resolve_request(user_id, requester_id).await
    }
}
