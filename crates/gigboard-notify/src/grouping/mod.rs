//! Feed grouping: display item types, the grouping engine, and group copy.

pub mod display;
pub mod engine;
pub mod formatter;

pub use display::{DisplayItem, GroupedNotification};
pub use engine::GroupingEngine;
