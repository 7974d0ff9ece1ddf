//! Observable feed state.

use serde::Serialize;

use gigboard_entity::notification::NotificationRecord;

/// What subscribers see after every change to the feed.
///
/// `records` already carry the tentative/confirmed read overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    /// Records with local read state applied, in platform order.
    pub records: Vec<NotificationRecord>,
    /// Unread records in `records`.
    pub unread_count: usize,
    /// Bumped on every publish; starts at 0 before the first refresh.
    pub version: u64,
}
