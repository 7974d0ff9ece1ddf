//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty configuration is
//! valid.

pub mod dismissal;
pub mod logging;
pub mod notifications;

use serde::{Deserialize, Serialize};

use self::dismissal::DismissalConfig;
use self::logging::LoggingConfig;
use self::notifications::{NotificationsConfig, ReadStateConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for `config/default.toml`, the
/// environment overlay, and `GIGBOARD__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Feed grouping settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Read-state mutation delivery settings.
    #[serde(default)]
    pub read_state: ReadStateConfig,
    /// Warning dismissal persistence settings.
    #[serde(default)]
    pub dismissal: DismissalConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `GIGBOARD__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GIGBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.notifications.group_window_ms == 0 {
            return Err(AppError::configuration(
                "notifications.group_window_ms must be at least 1",
            ));
        }
        if self.dismissal.backend == "file" && self.dismissal.data_dir.trim().is_empty() {
            return Err(AppError::configuration("dismissal.data_dir must not be empty"));
        }
        Ok(())
    }
}
