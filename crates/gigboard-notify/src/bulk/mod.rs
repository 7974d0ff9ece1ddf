//! Batch accept/decline over single-item endpoints.

pub mod coordinator;
pub mod result;
pub mod selection;

pub use coordinator::BulkActionCoordinator;
pub use result::{BulkActionResult, BulkItemError, BulkOutcome, BulkSummary, FailureCause};
pub use selection::SelectionState;
