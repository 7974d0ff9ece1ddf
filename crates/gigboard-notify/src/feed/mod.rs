//! The feed facade the UI talks to.

pub mod filter;
pub mod service;
pub mod snapshot;

pub use filter::FeedFilter;
pub use service::NotificationFeed;
pub use snapshot::FeedSnapshot;
