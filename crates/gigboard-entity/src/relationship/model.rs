//! Pending follow request model.

use serde::{Deserialize, Serialize};

use gigboard_core::types::{RequesterId, TimestampMs};

/// A follow request waiting for the user to accept or decline it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRequest {
    /// The user asking to follow.
    pub requester_id: RequesterId,
    /// Display name of the requester.
    pub requester_name: String,
    /// Requester avatar, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the request was sent, in milliseconds.
    pub created_at: TimestampMs,
}

impl RelationshipRequest {
    /// Create a request without an avatar.
    pub fn new(
        requester_id: impl Into<RequesterId>,
        requester_name: impl Into<String>,
        created_at: TimestampMs,
    ) -> Self {
        Self {
            requester_id: requester_id.into(),
            requester_name: requester_name.into(),
            avatar_url: None,
            created_at,
        }
    }
}
