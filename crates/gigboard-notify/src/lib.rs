//! # gigboard-notify
//!
//! Notification lifecycle engine for Gigboard. Provides:
//!
//! - Time-bucketed grouping of raw notification records into a display feed
//! - Unread counting and mark-as-read with a tentative/confirmed overlay
//! - Sequential bulk accept/decline of follow requests with per-item results
//! - Durable dismissal of warning banners
//! - A feed facade publishing snapshots to subscribers

pub mod bulk;
pub mod dismissal;
pub mod feed;
pub mod grouping;
pub mod platform;
pub mod read_state;

pub use bulk::BulkActionCoordinator;
pub use dismissal::DismissalPersistence;
pub use feed::NotificationFeed;
pub use grouping::GroupingEngine;
pub use platform::InMemoryPlatform;
pub use read_state::ReadStateTracker;
