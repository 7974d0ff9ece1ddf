//! Sequential fan-out of single-item operations with per-item tracking.
//!
//! The platform exposes only single-item accept/decline endpoints, so a batch
//! is executed here one item at a time. Items are awaited in order, each
//! outcome is recorded, and a failure never stops the rest of the batch.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use gigboard_core::error::AppError;
use gigboard_core::result::AppResult;
use gigboard_core::types::RequesterId;

use super::result::{BulkActionResult, BulkSummary};
use super::selection::SelectionState;

/// Owns the selection and runs batches over it.
#[derive(Debug)]
pub struct BulkActionCoordinator<Id = RequesterId> {
    state: Mutex<SelectionState<Id>>,
}

impl<Id> Default for BulkActionCoordinator<Id> {
    fn default() -> Self {
        Self {
            state: Mutex::new(SelectionState::Idle),
        }
    }
}

/// Resets the selection to `Idle` when a run ends, however it ends.
struct ExecutionGuard<'a, Id> {
    state: &'a Mutex<SelectionState<Id>>,
}

impl<Id> Drop for ExecutionGuard<'_, Id> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = SelectionState::Idle;
    }
}

impl<Id> BulkActionCoordinator<Id>
where
    Id: Clone + Eq + Hash + fmt::Display,
{
    /// Create a coordinator with an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SelectionState<Id>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the selection state.
    pub fn state(&self) -> SelectionState<Id> {
        self.lock().clone()
    }

    /// Currently selected (or executing) ids, in selection order.
    pub fn selection(&self) -> Vec<Id> {
        self.lock().ids().to_vec()
    }

    /// Add `id` to the selection.
    pub fn select(&self, id: Id) -> AppResult<()> {
        let mut state = self.lock();
        ensure_not_executing(&state)?;
        state.add(id);
        Ok(())
    }

    /// Remove `id` from the selection.
    pub fn deselect(&self, id: &Id) -> AppResult<()> {
        let mut state = self.lock();
        ensure_not_executing(&state)?;
        state.remove(id);
        Ok(())
    }

    /// Flip `id` in or out of the selection. Returns whether it is now selected.
    pub fn toggle(&self, id: Id) -> AppResult<bool> {
        let mut state = self.lock();
        ensure_not_executing(&state)?;
        if state.ids().contains(&id) {
            state.remove(&id);
            Ok(false)
        } else {
            state.add(id);
            Ok(true)
        }
    }

    /// Add every id in `ids`, in order.
    pub fn select_all(&self, ids: impl IntoIterator<Item = Id>) -> AppResult<()> {
        let mut state = self.lock();
        ensure_not_executing(&state)?;
        for id in ids {
            state.add(id);
        }
        Ok(())
    }

    /// Drop the selection.
    pub fn clear(&self) -> AppResult<()> {
        let mut state = self.lock();
        ensure_not_executing(&state)?;
        *state = SelectionState::Idle;
        Ok(())
    }

    /// Run `operation` over the current selection.
    ///
    /// An empty selection yields an empty summary without calling anything.
    pub async fn execute_selection<F, Fut>(&self, operation: F) -> AppResult<BulkSummary<Id>>
    where
        F: FnMut(Id) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let ids = self.selection();
        self.execute(ids, operation).await
    }

    /// Run `operation` over `ids`, moving the selection through `Executing`
    /// and back to `Idle` regardless of per-item outcomes.
    ///
    /// Fails with `Conflict` only if another run is already in progress.
    pub async fn execute<F, Fut>(&self, ids: Vec<Id>, operation: F) -> AppResult<BulkSummary<Id>>
    where
        F: FnMut(Id) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let ids = dedupe(ids);
        {
            let mut state = self.lock();
            ensure_not_executing(&state)?;
            *state = SelectionState::Executing(ids.clone());
        }
        let _guard = ExecutionGuard { state: &self.state };

        Ok(Self::run_bulk(ids, operation).await)
    }

    /// Invoke `operation` once per distinct id, strictly one after another.
    ///
    /// Returns exactly one result per distinct id. Failures are recorded and
    /// never abort the batch; nothing is retried.
    pub async fn run_bulk<F, Fut>(ids: Vec<Id>, mut operation: F) -> BulkSummary<Id>
    where
        F: FnMut(Id) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let ids = dedupe(ids);
        if ids.is_empty() {
            return BulkSummary::empty();
        }

        let run_id = Uuid::now_v7();
        info!(%run_id, items = ids.len(), "Starting bulk run");

        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            match operation(id.clone()).await {
                Ok(()) => {
                    debug!(%run_id, item = %id, "Bulk item succeeded");
                    results.push(BulkActionResult::success(id));
                }
                Err(e) => {
                    warn!(%run_id, item = %id, error = %e, "Bulk item failed");
                    results.push(BulkActionResult::failure(id, &e));
                }
            }
        }

        let summary = BulkSummary::from_results(results);
        info!(
            %run_id,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk run finished"
        );
        summary
    }
}

fn ensure_not_executing<Id>(state: &SelectionState<Id>) -> AppResult<()> {
    if matches!(state, SelectionState::Executing(_)) {
        return Err(AppError::conflict("A bulk action is already running"));
    }
    Ok(())
}

/// Drop repeated ids, keeping first-occurrence order.
fn dedupe<Id: Clone + Eq + Hash>(ids: Vec<Id>) -> Vec<Id> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
