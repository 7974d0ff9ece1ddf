//! Millisecond timestamps as used by the data platform.

use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> TimestampMs {
    Utc::now().timestamp_millis()
}

/// Convert a platform timestamp into a UTC datetime.
///
/// Returns `None` for values outside chrono's representable range.
pub fn to_datetime(ms: TimestampMs) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
