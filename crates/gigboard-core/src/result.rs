//! Result alias used by every Gigboard crate.

use crate::error::AppError;

/// `Result` specialised to [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
