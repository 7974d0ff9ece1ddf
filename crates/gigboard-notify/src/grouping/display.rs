//! Display items produced by the grouping engine.

use serde::{Deserialize, Serialize};

use gigboard_core::types::TimestampMs;
use gigboard_entity::notification::{NotificationRecord, NotificationType};

/// Several same-type records collapsed into one feed entry.
///
/// Derived and transient: rebuilt on every grouping pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedNotification {
    /// Stable for a given (type, bucket anchor) pair.
    pub id: String,
    /// Grouped type name, e.g. `profile_view_group`.
    #[serde(rename = "type")]
    pub group_type: String,
    /// Type of every contained record.
    pub source_type: NotificationType,
    /// Contained records, most recent first.
    pub notifications: Vec<NotificationRecord>,
    /// `notifications.len()`.
    pub count: usize,
    /// True iff every contained record is read.
    pub is_read: bool,
    /// Largest `created_at` among the contained records.
    pub latest_timestamp: TimestampMs,
    /// Title of the most recent record.
    pub title: String,
    /// Aggregate summary, e.g. "3 people viewed your profile".
    pub description: String,
}

impl GroupedNotification {
    /// Number of contained records not yet read.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|r| r.is_unread()).count()
    }
}

/// One entry of the feed: a standalone record or a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    /// A record that did not share its bucket with any other record.
    Record(NotificationRecord),
    /// Two or more records from the same bucket.
    Group(GroupedNotification),
}

impl DisplayItem {
    /// The record id, or the derived group id.
    pub fn id(&self) -> &str {
        match self {
            Self::Record(r) => r.id.as_str(),
            Self::Group(g) => &g.id,
        }
    }

    /// Timestamp the feed is ordered by.
    pub fn timestamp(&self) -> TimestampMs {
        match self {
            Self::Record(r) => r.created_at,
            Self::Group(g) => g.latest_timestamp,
        }
    }

    /// Type of the underlying record(s).
    pub fn source_type(&self) -> NotificationType {
        match self {
            Self::Record(r) => r.kind,
            Self::Group(g) => g.source_type,
        }
    }

    /// Read state of the entry.
    pub fn is_read(&self) -> bool {
        match self {
            Self::Record(r) => r.is_read,
            Self::Group(g) => g.is_read,
        }
    }

    /// Number of underlying records.
    pub fn count(&self) -> usize {
        match self {
            Self::Record(_) => 1,
            Self::Group(g) => g.count,
        }
    }

    /// Underlying records, most recent first.
    pub fn records(&self) -> &[NotificationRecord] {
        match self {
            Self::Record(r) => std::slice::from_ref(r),
            Self::Group(g) => &g.notifications,
        }
    }

    /// Whether this entry is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}
