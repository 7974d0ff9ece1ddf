//! Notification type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The event that produced a notification record.
///
/// The set is closed: the platform never emits a type outside this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone viewed the user's profile.
    ProfileView,
    /// Someone asked to follow the user.
    FollowRequest,
    /// Someone started following the user.
    NewFollower,
    /// A follow request sent by the user was accepted.
    FollowAccepted,
    /// The user was invited to play a gig.
    GigInvite,
    /// The user's gig application was approved.
    GigApproved,
    /// A gig the user is booked for is coming up.
    GigReminder,
    /// Someone applied to a gig the user posted.
    GigApplication,
    /// A gig the user is part of was cancelled.
    GigCancelled,
    /// A direct message arrived.
    NewMessage,
    /// The user was asked to leave a review.
    NewReview,
    /// Someone reviewed the user.
    ReviewReceived,
    /// Platform announcements.
    SystemUpdates,
}

impl NotificationType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::ProfileView,
        Self::FollowRequest,
        Self::NewFollower,
        Self::FollowAccepted,
        Self::GigInvite,
        Self::GigApproved,
        Self::GigReminder,
        Self::GigApplication,
        Self::GigCancelled,
        Self::NewMessage,
        Self::NewReview,
        Self::ReviewReceived,
        Self::SystemUpdates,
    ];

    /// Return the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileView => "profile_view",
            Self::FollowRequest => "follow_request",
            Self::NewFollower => "new_follower",
            Self::FollowAccepted => "follow_accepted",
            Self::GigInvite => "gig_invite",
            Self::GigApproved => "gig_approved",
            Self::GigReminder => "gig_reminder",
            Self::GigApplication => "gig_application",
            Self::GigCancelled => "gig_cancelled",
            Self::NewMessage => "new_message",
            Self::NewReview => "new_review",
            Self::ReviewReceived => "review_received",
            Self::SystemUpdates => "system_updates",
        }
    }

    /// Name of the grouped form of this type, e.g. `profile_view_group`.
    pub fn group_name(&self) -> String {
        format!("{}_group", self.as_str())
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = gigboard_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| {
                gigboard_core::AppError::validation(format!("Invalid notification type: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_every_wire_name() {
        for t in NotificationType::ALL {
            assert_eq!(t.as_str().parse::<NotificationType>().unwrap(), t);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("band_role_score".parse::<NotificationType>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&NotificationType::GigInvite).unwrap();
        assert_eq!(json, "\"gig_invite\"");
    }

    #[test]
    fn test_group_name() {
        assert_eq!(NotificationType::ProfileView.group_name(), "profile_view_group");
    }
}
