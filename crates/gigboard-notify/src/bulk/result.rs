//! Per-item outcomes and the aggregate summary of a bulk run.

use serde::Serialize;

use gigboard_core::error::{AppError, ErrorKind};

/// Why a single item failed. The aggregate counts do not distinguish causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// The platform no longer knows the item.
    NotFound,
    /// The call did not complete.
    TransientNetwork,
    /// Any other rejection.
    Other,
}

impl From<ErrorKind> for FailureCause {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::TransientNetwork => Self::TransientNetwork,
            _ => Self::Other,
        }
    }
}

/// Error detail attached to a failed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItemError {
    /// Failure category.
    pub cause: FailureCause,
    /// Message reported by the platform.
    pub message: String,
}

impl From<&AppError> for BulkItemError {
    fn from(err: &AppError) -> Self {
        Self {
            cause: err.kind.into(),
            message: err.message.clone(),
        }
    }
}

/// Outcome of one item. The error exists iff the item failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// The operation completed.
    Success,
    /// The operation was rejected or did not complete.
    Failure(BulkItemError),
}

/// Result recorded for one attempted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResult<Id> {
    /// The item the operation targeted.
    pub request_id: Id,
    /// What happened.
    #[serde(flatten)]
    pub outcome: BulkOutcome,
}

impl<Id> BulkActionResult<Id> {
    /// A successful item.
    pub fn success(request_id: Id) -> Self {
        Self {
            request_id,
            outcome: BulkOutcome::Success,
        }
    }

    /// A failed item.
    pub fn failure(request_id: Id, err: &AppError) -> Self {
        Self {
            request_id,
            outcome: BulkOutcome::Failure(err.into()),
        }
    }

    /// Whether the item succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BulkOutcome::Success)
    }

    /// Error detail, present only for failures.
    pub fn error(&self) -> Option<&BulkItemError> {
        match &self.outcome {
            BulkOutcome::Success => None,
            BulkOutcome::Failure(e) => Some(e),
        }
    }
}

/// Aggregate of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSummary<Id> {
    /// Items that succeeded.
    pub succeeded: usize,
    /// Items that failed.
    pub failed: usize,
    /// One entry per attempted item, in execution order.
    pub results: Vec<BulkActionResult<Id>>,
}

impl<Id> BulkSummary<Id> {
    /// Summarize `results`.
    pub fn from_results(results: Vec<BulkActionResult<Id>>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// A run over no items.
    pub fn empty() -> Self {
        Self::from_results(Vec::new())
    }

    /// Number of attempted items.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Ids of the failed items, in execution order.
    pub fn failed_ids(&self) -> Vec<&Id> {
        self.results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| &r.request_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = BulkSummary::from_results(vec![
            BulkActionResult::success("a"),
            BulkActionResult::failure("b", &AppError::not_found("gone")),
            BulkActionResult::success("c"),
        ]);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_ids(), vec![&"b"]);
    }

    #[test]
    fn test_error_only_on_failure() {
        let ok = BulkActionResult::success("a");
        assert!(ok.error().is_none());
        let bad = BulkActionResult::failure("b", &AppError::transient("timeout"));
        let err = bad.error().expect("failure carries error");
        assert_eq!(err.cause, FailureCause::TransientNetwork);
        assert_eq!(err.message, "timeout");
    }

    #[test]
    fn test_serialized_shape() {
        let bad = BulkActionResult::failure("b", &AppError::not_found("gone"));
        let json = serde_json::to_value(&bad).unwrap();
        assert_eq!(json["requestId"], "b");
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["error"]["cause"], "not_found");

        let ok = serde_json::to_value(BulkActionResult::success("a")).unwrap();
        assert_eq!(ok["outcome"], "success");
        assert!(ok.get("error").is_none());
    }
}
