//! Notification record model.

use serde::{Deserialize, Serialize};

use gigboard_core::types::{NotificationId, TimestampMs};

use super::kind::NotificationType;

/// One atomic event delivered to a user, as stored by the data platform.
///
/// Records are immutable apart from `is_read`, which only ever moves from
/// `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Unique within the user's record set.
    pub id: NotificationId,
    /// The event that produced the record.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Display title.
    pub title: String,
    /// Display body text.
    pub message: String,
    /// Optional deep link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    /// Whether the user has read the record.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time in milliseconds since the epoch.
    pub created_at: TimestampMs,
}

impl NotificationRecord {
    /// Create an unread record with no deep link.
    pub fn new(
        id: impl Into<NotificationId>,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: TimestampMs,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
            is_read: false,
            created_at,
        }
    }

    /// Attach a deep link.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Mark the record as already read.
    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }

    /// Check if the record has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_json_shape() {
        let raw = r#"{
            "id": "n1",
            "type": "profile_view",
            "title": "Profile view",
            "message": "Ana viewed your profile",
            "actionUrl": "/profile/ana",
            "isRead": false,
            "createdAt": 1700000000000
        }"#;
        let record: NotificationRecord = serde_json::from_str(raw).expect("parse");
        assert_eq!(record.kind, NotificationType::ProfileView);
        assert_eq!(record.action_url.as_deref(), Some("/profile/ana"));
        assert!(record.is_unread());
        assert_eq!(record.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{"id":"n2","type":"new_message","title":"t","message":"m","createdAt":5}"#;
        let record: NotificationRecord = serde_json::from_str(raw).expect("parse");
        assert!(record.action_url.is_none());
        assert!(!record.is_read);
    }
}
