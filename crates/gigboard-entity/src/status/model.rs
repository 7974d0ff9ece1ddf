//! Account status banner model.

use serde::{Deserialize, Serialize};

use gigboard_core::types::TimestampMs;

use super::severity::StatusSeverity;

/// A moderation status attached to the user's account and shown as a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    /// How severe the status is.
    pub severity: StatusSeverity,
    /// Human-readable reason supplied by moderation.
    pub reason: String,
    /// When the status was issued, in milliseconds.
    pub created_at: TimestampMs,
    /// When a temporary status lapses, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<TimestampMs>,
}

impl AccountStatus {
    /// Create a status with no expiry.
    pub fn new(severity: StatusSeverity, reason: impl Into<String>, created_at: TimestampMs) -> Self {
        Self {
            severity,
            reason: reason.into(),
            created_at,
            expires_at: None,
        }
    }

    /// Shorthand for a warning-severity status.
    pub fn warning(reason: impl Into<String>, created_at: TimestampMs) -> Self {
        Self::new(StatusSeverity::Warning, reason, created_at)
    }

    /// Check whether the status has lapsed at `now`.
    pub fn is_expired_at(&self, now: TimestampMs) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}
