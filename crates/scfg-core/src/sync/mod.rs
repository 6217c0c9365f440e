//! Reconciliation between declared and installed packages

mod diff;
mod engine;
mod report;

pub use diff::{DiffEntry, DiffKind, merge_diff};
pub use engine::SyncEngine;
pub use report::{Listing, Report};
