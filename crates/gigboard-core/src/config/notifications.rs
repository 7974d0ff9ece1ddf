//! Notification feed and read-state configuration.

use serde::{Deserialize, Serialize};

/// Feed grouping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Width of the grouping window in milliseconds.
    ///
    /// Same-type records whose `created_at` lies within this distance of the
    /// newest record of their bucket collapse into one group. This is the
    /// single tunable of the grouping engine.
    #[serde(default = "default_group_window")]
    pub group_window_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            group_window_ms: default_group_window(),
        }
    }
}

/// Delivery settings for mark-as-read mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadStateConfig {
    /// Extra attempts after a transient failure of a single mark-as-read.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay in milliseconds between attempts.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for ReadStateConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_group_window() -> u64 {
    3_600_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    250
}
