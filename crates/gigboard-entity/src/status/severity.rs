//! Account status severity enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an account status banner, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSeverity {
    /// A heads-up about account behaviour. The only dismissible severity.
    Warning,
    /// Some features are restricted.
    Restriction,
    /// The account is suspended pending review.
    Suspension,
    /// The account is banned until a fixed date.
    TemporaryBan,
    /// The account is permanently banned.
    Ban,
}

impl StatusSeverity {
    /// Whether the user may permanently acknowledge a banner of this severity.
    pub fn is_dismissible(&self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Return the severity as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Restriction => "restriction",
            Self::Suspension => "suspension",
            Self::TemporaryBan => "temporary_ban",
            Self::Ban => "ban",
        }
    }
}

impl fmt::Display for StatusSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusSeverity {
    type Err = gigboard_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(Self::Warning),
            "restriction" => Ok(Self::Restriction),
            "suspension" => Ok(Self::Suspension),
            "temporary_ban" | "temp_ban" => Ok(Self::TemporaryBan),
            "ban" => Ok(Self::Ban),
            _ => Err(gigboard_core::AppError::validation(format!(
                "Invalid status severity: '{s}'. Expected one of: warning, restriction, suspension, temporary_ban, ban"
            ))),
        }
    }
}
