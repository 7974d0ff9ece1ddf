//! Persisted acknowledgment of warning banners.

pub mod banner;
pub mod key;
pub mod persistence;

pub use banner::BannerPolicy;
pub use key::DismissalKey;
pub use persistence::{DismissalBlob, DismissalPersistence};
