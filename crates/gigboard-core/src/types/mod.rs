//! Shared value types.

pub mod id;
pub mod timestamp;

pub use id::{NotificationId, RequesterId, UserId};
pub use timestamp::TimestampMs;
