//! Tentative/confirmed read overlay.
//!
//! A mark-as-read is shown immediately (tentative), kept after the platform
//! acknowledges it (confirmed) until a fresh snapshot reflects it, and
//! removed again if the platform rejects it (rollback).

use std::collections::HashSet;

use gigboard_core::types::NotificationId;
use gigboard_entity::notification::NotificationRecord;

/// Local read state layered over the last platform snapshot.
#[derive(Debug, Clone, Default)]
pub struct PendingReads {
    /// Mutation in flight.
    tentative: HashSet<NotificationId>,
    /// Mutation acknowledged; snapshot not yet refreshed.
    confirmed: HashSet<NotificationId>,
}

impl PendingReads {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `id` as read while its mutation is in flight.
    ///
    /// Returns `false` if the id already reads as read in the overlay.
    pub fn begin(&mut self, id: &NotificationId) -> bool {
        if self.confirmed.contains(id) {
            return false;
        }
        self.tentative.insert(id.clone())
    }

    /// Begin every id in `ids`, returning those that were newly begun.
    pub fn begin_many<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a NotificationId>,
    ) -> Vec<NotificationId> {
        ids.into_iter()
            .filter(|id| self.begin(id))
            .cloned()
            .collect()
    }

    /// The platform acknowledged the mutation for `id`.
    pub fn confirm(&mut self, id: &NotificationId) {
        self.tentative.remove(id);
        self.confirmed.insert(id.clone());
    }

    /// Confirm every id in `ids`.
    pub fn confirm_many(&mut self, ids: &[NotificationId]) {
        for id in ids {
            self.confirm(id);
        }
    }

    /// The platform rejected the mutation for `id`; show its prior state.
    pub fn rollback(&mut self, id: &NotificationId) {
        self.tentative.remove(id);
    }

    /// Roll back every id in `ids`.
    pub fn rollback_many(&mut self, ids: &[NotificationId]) {
        for id in ids {
            self.rollback(id);
        }
    }

    /// Whether a mutation for `id` is still in flight.
    pub fn is_tentative(&self, id: &NotificationId) -> bool {
        self.tentative.contains(id)
    }

    /// Whether the overlay reads `id` as read.
    pub fn reads_as_read(&self, id: &NotificationId) -> bool {
        self.tentative.contains(id) || self.confirmed.contains(id)
    }

    /// Number of mutations in flight.
    pub fn in_flight(&self) -> usize {
        self.tentative.len()
    }

    /// `records` with the overlay applied.
    pub fn apply(&self, records: &[NotificationRecord]) -> Vec<NotificationRecord> {
        records
            .iter()
            .map(|r| {
                let mut r = r.clone();
                r.is_read |= self.reads_as_read(&r.id);
                r
            })
            .collect()
    }

    /// Drop confirmed ids that a fresh snapshot already reports as read or
    /// no longer contains. Tentative ids stay until their call resolves.
    pub fn reconcile(&mut self, records: &[NotificationRecord]) {
        self.confirmed.retain(|id| {
            records
                .iter()
                .any(|r| &r.id == id && r.is_unread())
        });
    }
}
