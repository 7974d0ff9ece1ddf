//! Folds raw notification records into the display feed.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use gigboard_core::config::notifications::NotificationsConfig;
use gigboard_core::error::AppError;
use gigboard_core::result::AppResult;
use gigboard_core::types::TimestampMs;
use gigboard_entity::notification::{NotificationRecord, NotificationType};

use super::display::{DisplayItem, GroupedNotification};
use super::formatter::GroupFormatter;

/// Pure grouping of records by type and time bucket.
///
/// Within a type, records are walked newest first. The newest record opens a
/// bucket and anchors it; later records join while they are less than
/// `window_ms` older than the anchor, otherwise they open the next bucket.
/// Because the walk runs over a fully sorted partition, the output depends on
/// the input set only, never on input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingEngine {
    window_ms: TimestampMs,
}

impl GroupingEngine {
    /// Create an engine with the given bucket width. Zero is rejected.
    pub fn new(window_ms: u64) -> AppResult<Self> {
        if window_ms == 0 {
            return Err(AppError::validation("Grouping window must be at least 1 ms"));
        }
        Ok(Self {
            window_ms: TimestampMs::try_from(window_ms).unwrap_or(TimestampMs::MAX),
        })
    }

    /// Create an engine from the `notifications` config section.
    pub fn from_config(config: &NotificationsConfig) -> AppResult<Self> {
        Self::new(config.group_window_ms)
    }

    /// Bucket width in milliseconds.
    pub fn window_ms(&self) -> TimestampMs {
        self.window_ms
    }

    /// Build the display feed for `records`.
    ///
    /// Records sharing an id are collapsed into one. The copy with the latest
    /// `created_at` survives, with ties broken on type and then content, and
    /// it is read if any copy was read.
    pub fn group(&self, records: &[NotificationRecord]) -> Vec<DisplayItem> {
        let mut partitions: BTreeMap<NotificationType, Vec<NotificationRecord>> = BTreeMap::new();
        for record in dedupe(records) {
            partitions.entry(record.kind).or_default().push(record);
        }

        let mut items = Vec::new();
        for (kind, mut partition) in partitions {
            partition.sort_by(newest_first);

            let mut bucket: Vec<NotificationRecord> = Vec::new();
            for record in partition {
                let starts_new = bucket
                    .first()
                    .map(|anchor| anchor.created_at.saturating_sub(record.created_at) >= self.window_ms)
                    .unwrap_or(false);
                if starts_new {
                    items.push(close_bucket(kind, std::mem::take(&mut bucket)));
                }
                bucket.push(record);
            }
            if !bucket.is_empty() {
                items.push(close_bucket(kind, bucket));
            }
        }

        items.sort_by(feed_order);
        trace!(
            records = records.len(),
            items = items.len(),
            window_ms = self.window_ms,
            "Grouped notification feed"
        );
        items
    }

    /// Check that `items` is a correct grouping of `records`.
    ///
    /// Returns an `InvariantViolation` naming the first broken guarantee:
    /// completeness, ordering, group consistency, or idempotence.
    pub fn verify(&self, records: &[NotificationRecord], items: &[DisplayItem]) -> AppResult<()> {
        let expected: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        for item in items {
            for record in item.records() {
                if !seen.insert(record.id.as_str()) {
                    return Err(AppError::invariant(format!(
                        "Record {} appears in more than one feed entry",
                        record.id
                    )));
                }
                if !expected.contains(record.id.as_str()) {
                    return Err(AppError::invariant(format!(
                        "Record {} is not part of the input",
                        record.id
                    )));
                }
            }
        }
        if seen.len() != expected.len() {
            return Err(AppError::invariant(format!(
                "{} input records missing from the feed",
                expected.len() - seen.len()
            )));
        }

        if let Some(pair) = items.windows(2).find(|w| feed_order(&w[0], &w[1]) == Ordering::Greater) {
            return Err(AppError::invariant(format!(
                "Feed entry {} is ordered before {}",
                pair[0].id(),
                pair[1].id()
            )));
        }

        for item in items {
            if let DisplayItem::Group(group) = item {
                verify_group(group)?;
            }
        }

        if self.group(records) != items {
            return Err(AppError::invariant("Regrouping the same input produced a different feed"));
        }
        Ok(())
    }
}

fn verify_group(group: &GroupedNotification) -> AppResult<()> {
    if group.count != group.notifications.len() || group.count < 2 {
        return Err(AppError::invariant(format!(
            "Group {} has count {} for {} records",
            group.id,
            group.count,
            group.notifications.len()
        )));
    }
    if group.is_read != group.notifications.iter().all(|r| r.is_read) {
        return Err(AppError::invariant(format!(
            "Group {} read state disagrees with its records",
            group.id
        )));
    }
    let latest = group.notifications.iter().map(|r| r.created_at).max();
    if latest != Some(group.latest_timestamp) {
        return Err(AppError::invariant(format!(
            "Group {} latest timestamp is stale",
            group.id
        )));
    }
    if group
        .notifications
        .windows(2)
        .any(|w| newest_first(&w[0], &w[1]) == Ordering::Greater)
    {
        return Err(AppError::invariant(format!(
            "Group {} records are not most-recent first",
            group.id
        )));
    }
    Ok(())
}

/// Collapse records sharing an id into a single survivor.
fn dedupe(records: &[NotificationRecord]) -> Vec<NotificationRecord> {
    let mut by_id: BTreeMap<&str, NotificationRecord> = BTreeMap::new();
    for record in records {
        match by_id.entry(record.id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => {
                let is_read = slot.get().is_read || record.is_read;
                if survivor_rank(record) > survivor_rank(slot.get()) {
                    slot.insert(record.clone());
                }
                slot.get_mut().is_read = is_read;
            }
        }
    }
    by_id.into_values().collect()
}

fn survivor_rank(
    record: &NotificationRecord,
) -> (TimestampMs, NotificationType, &str, &str, Option<&str>) {
    (
        record.created_at,
        record.kind,
        record.title.as_str(),
        record.message.as_str(),
        record.action_url.as_deref(),
    )
}

fn close_bucket(kind: NotificationType, mut bucket: Vec<NotificationRecord>) -> DisplayItem {
    if bucket.len() == 1 {
        if let Some(record) = bucket.pop() {
            return DisplayItem::Record(record);
        }
    }

    let count = bucket.len();
    let latest = &bucket[0];
    DisplayItem::Group(GroupedNotification {
        id: format!("{}_{}", kind.group_name(), latest.created_at),
        group_type: kind.group_name(),
        source_type: kind,
        count,
        is_read: bucket.iter().all(|r| r.is_read),
        latest_timestamp: latest.created_at,
        title: latest.title.clone(),
        description: GroupFormatter::description(kind, count),
        notifications: bucket,
    })
}

/// `created_at` descending, then id ascending.
fn newest_first(a: &NotificationRecord, b: &NotificationRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Representative timestamp descending, then item id ascending.
fn feed_order(a: &DisplayItem, b: &DisplayItem) -> Ordering {
    b.timestamp()
        .cmp(&a.timestamp())
        .then_with(|| a.id().cmp(b.id()))
}
