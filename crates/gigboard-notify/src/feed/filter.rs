//! Feed filters applied to records before grouping.

use serde::{Deserialize, Serialize};

use gigboard_entity::notification::{NotificationRecord, NotificationType};

/// Which records the display feed includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", content = "type", rename_all = "snake_case")]
pub enum FeedFilter {
    /// Every record.
    #[default]
    All,
    /// Unread records only.
    Unread,
    /// Records of one type.
    ByType(NotificationType),
}

impl FeedFilter {
    /// Whether `record` passes the filter.
    pub fn matches(&self, record: &NotificationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Unread => record.is_unread(),
            Self::ByType(kind) => record.kind == *kind,
        }
    }

    /// Records that pass the filter, in input order.
    pub fn apply(&self, records: &[NotificationRecord]) -> Vec<NotificationRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
