//! Follow relationship entities.

pub mod model;

pub use model::RelationshipRequest;
