//! Key builders for every device-local state entry.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application persists.

/// Prefix applied to all Gigboard state keys.
const PREFIX: &str = "gigboard";

/// Key holding the dismissed-warning set for a user/device identity.
pub fn dismissals(identity: &str) -> String {
    format!("{PREFIX}:dismissals:{identity}")
}
