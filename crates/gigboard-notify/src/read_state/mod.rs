//! Read-state tracking: unread counts, mark-as-read intents, and the
//! tentative/confirmed overlay.

pub mod pending;
pub mod tracker;

pub use pending::PendingReads;
pub use tracker::{OpenOutcome, ReadStateTracker};
