//! Unread counting and read-state mutations.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use gigboard_core::config::notifications::ReadStateConfig;
use gigboard_core::error::AppError;
use gigboard_core::result::AppResult;
use gigboard_core::types::{NotificationId, UserId};
use gigboard_entity::notification::NotificationRecord;

use crate::grouping::DisplayItem;
use crate::platform::NotificationSource;

/// What opening a feed entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The record was unread and has now been marked read.
    MarkedRead(NotificationId),
    /// The record was already read; nothing was sent.
    AlreadyRead(NotificationId),
    /// A multi-record group: show its records, mark nothing.
    ShowGroup(Vec<NotificationRecord>),
}

/// Issues read-state mutations for one user against the platform.
#[derive(Debug, Clone)]
pub struct ReadStateTracker {
    source: Arc<dyn NotificationSource>,
    user_id: UserId,
    config: ReadStateConfig,
}

impl ReadStateTracker {
    /// Create a tracker for `user_id`.
    pub fn new(source: Arc<dyn NotificationSource>, user_id: UserId, config: ReadStateConfig) -> Self {
        Self {
            source,
            user_id,
            config,
        }
    }

    /// Number of unread records.
    pub fn unread_count(records: &[NotificationRecord]) -> usize {
        records.iter().filter(|r| r.is_unread()).count()
    }

    /// Mark one record read.
    ///
    /// Transient failures are retried up to `max_retries` times. `NotFound`
    /// is returned immediately. Marking an already-read record succeeds.
    pub async fn mark_as_read(&self, id: &NotificationId) -> AppResult<()> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                info!(
                    attempt = attempt,
                    max = self.config.max_retries,
                    notification_id = %id,
                    "Retrying mark-as-read"
                );
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }

            match self.source.mark_notification_read(&self.user_id, id).await {
                Ok(()) => {
                    debug!(user_id = %self.user_id, notification_id = %id, "Marked notification read");
                    return Ok(());
                }
                Err(e) if e.is_transient() => {
                    warn!(attempt = attempt, notification_id = %id, error = %e, "Mark-as-read failed");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::transient("Mark-as-read did not complete")))
    }

    /// Mark every record read with one bulk mutation.
    ///
    /// The result covers the whole operation; there is no per-record
    /// fallback.
    pub async fn mark_all_as_read(&self) -> AppResult<()> {
        self.source
            .mark_all_notifications_read(&self.user_id)
            .await
            .inspect(|_| info!(user_id = %self.user_id, "Marked all notifications read"))
            .inspect_err(|e| warn!(user_id = %self.user_id, error = %e, "Mark-all-as-read failed"))
    }

    /// Open a feed entry.
    ///
    /// A record, or a group holding exactly one record, goes through the
    /// individual read path. A larger group is returned for the detail view
    /// without marking anything.
    pub async fn open(&self, item: &DisplayItem) -> AppResult<OpenOutcome> {
        let record = match item.records() {
            [single] => single,
            records => return Ok(OpenOutcome::ShowGroup(records.to_vec())),
        };

        if record.is_read {
            return Ok(OpenOutcome::AlreadyRead(record.id.clone()));
        }
        self.mark_as_read(&record.id).await?;
        Ok(OpenOutcome::MarkedRead(record.id.clone()))
    }
}
