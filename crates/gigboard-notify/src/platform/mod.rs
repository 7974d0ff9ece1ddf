//! Operations consumed from the hosted data platform.
//!
//! The platform owns notification records and follow relationships. The
//! engine only sees it through these two traits, so any backend (HTTP
//! client, test double) can be plugged in.

pub mod memory;

use async_trait::async_trait;

use gigboard_core::result::AppResult;
use gigboard_core::types::{NotificationId, RequesterId, UserId};
use gigboard_entity::notification::NotificationRecord;
use gigboard_entity::relationship::RelationshipRequest;

pub use memory::InMemoryPlatform;

/// Source of a user's notification records and their read state.
#[async_trait]
pub trait NotificationSource: Send + Sync + std::fmt::Debug + 'static {
    /// All records for the user, in whatever order the platform returns them.
    async fn fetch_notifications(&self, user_id: &UserId) -> AppResult<Vec<NotificationRecord>>;

    /// Mark one record read. Idempotent; fails with `NotFound` for an
    /// unknown id.
    async fn mark_notification_read(&self, user_id: &UserId, id: &NotificationId) -> AppResult<()>;

    /// Mark every record read in one atomic mutation. Idempotent.
    async fn mark_all_notifications_read(&self, user_id: &UserId) -> AppResult<()>;
}

/// Source of pending follow requests and the single-item actions on them.
#[async_trait]
pub trait RelationshipSource: Send + Sync + std::fmt::Debug + 'static {
    /// Requests waiting for the user's decision.
    async fn fetch_pending_requests(&self, user_id: &UserId) -> AppResult<Vec<RelationshipRequest>>;

    /// Accept one request. Fails with `NotFound` if it was already resolved.
    async fn accept_request(&self, user_id: &UserId, requester_id: &RequesterId) -> AppResult<()>;

    /// Decline one request. Fails with `NotFound` if it was already resolved.
    async fn decline_request(&self, user_id: &UserId, requester_id: &RequesterId) -> AppResult<()>;
}
