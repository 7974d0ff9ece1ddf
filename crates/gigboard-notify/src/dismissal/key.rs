//! Dismissal key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use gigboard_core::types::TimestampMs;
use gigboard_entity::status::AccountStatus;

/// Stable identifier of a warning, independent of any wrapper id the
/// platform attaches to it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissalKey(String);

impl DismissalKey {
    /// `"warning-" + normalize(reason) + "-" + created_at`.
    ///
    /// Depends on nothing but the two inputs.
    pub fn derive(reason: &str, created_at: TimestampMs) -> Self {
        Self(format!("warning-{}-{}", normalize(reason), created_at))
    }

    /// Key for a status banner.
    pub fn for_status(status: &AccountStatus) -> Self {
        Self::derive(&status.reason, status.created_at)
    }

    /// Wrap an already-derived key, e.g. one read back from storage.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning its text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DismissalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case, trim, and collapse whitespace runs to single hyphens.
fn normalize(reason: &str) -> String {
    reason
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
