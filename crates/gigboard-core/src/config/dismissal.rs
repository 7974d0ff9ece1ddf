//! Device-local state configuration.

use serde::{Deserialize, Serialize};

/// Where acknowledged warning keys are stored on this device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissalConfig {
    /// Storage backend: `"file"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Directory holding the durable key-value entries (file backend only).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for DismissalConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_backend() -> String {
    "file".to_string()
}

fn default_data_dir() -> String {
    "data/state".to_string()
}
