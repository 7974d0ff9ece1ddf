//! Aggregate copy for grouped feed entries.

use gigboard_entity::notification::NotificationType;

/// Formats group descriptions for each notification type.
pub struct GroupFormatter;

impl GroupFormatter {
    /// Summary line for `count` records of type `kind`.
    pub fn description(kind: NotificationType, count: usize) -> String {
        match kind {
            NotificationType::ProfileView => format!("{count} people viewed your profile"),
            NotificationType::FollowRequest => format!("{count} new follow requests"),
            NotificationType::NewFollower => format!("{count} new followers"),
            NotificationType::FollowAccepted => {
                format!("{count} people accepted your follow request")
            }
            NotificationType::GigInvite => format!("{count} new gig invites"),
            NotificationType::GigApproved => format!("{count} gig applications approved"),
            NotificationType::GigReminder => format!("{count} upcoming gigs"),
            NotificationType::GigApplication => format!("{count} new applications to your gigs"),
            NotificationType::GigCancelled => format!("{count} gigs were cancelled"),
            NotificationType::NewMessage => format!("{count} new messages"),
            NotificationType::NewReview => format!("{count} gigs waiting for your review"),
            NotificationType::ReviewReceived => format!("{count} new reviews"),
            NotificationType::SystemUpdates => format!("{count} platform updates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_view_copy() {
        assert_eq!(
            GroupFormatter::description(NotificationType::ProfileView, 3),
            "3 people viewed your profile"
        );
    }

    #[test]
    fn test_every_type_mentions_count() {
        for kind in NotificationType::ALL {
            assert!(GroupFormatter::description(kind, 7).starts_with('7'));
        }
    }
}
