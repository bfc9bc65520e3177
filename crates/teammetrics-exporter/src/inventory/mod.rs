//! Refresh-and-cache engine.
//!
//! - `SnapshotStore`: current immutable snapshot behind a short-lived lock.
//! - `BoundedFetcher`: one cycle of listing + bounded detail fan-out.
//! - `RefreshScheduler`: staleness check + single-cycle gate on the read path.

mod fetcher;
mod scheduler;
mod store;

pub use fetcher::{BoundedFetcher, CycleReport};
pub use scheduler::{RefreshDecision, RefreshScheduler};
pub use store::SnapshotStore;
