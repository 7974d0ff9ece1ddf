//! Account status banner entities.

pub mod model;
pub mod severity;

pub use model::AccountStatus;
pub use severity::StatusSeverity;
