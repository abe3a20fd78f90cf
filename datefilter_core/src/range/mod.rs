//! Two-sided buffering for bounded-range edits

mod coordinator;
mod types;

pub use coordinator::RangeCoordinator;
pub use types::*;
