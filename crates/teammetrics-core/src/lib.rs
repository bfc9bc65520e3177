//! teammetrics core: inventory model, upstream wire shapes, and error types.
//!
//! This crate defines the records the exporter caches and projects into
//! metrics, plus the error surface shared with the exporter. It carries no
//! transport or runtime dependencies so it can be reused by tooling and
//! tests without pulling in tokio or an HTTP stack.
//!
//! # Guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TeamMetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{ErrorCode, Result, TeamMetricsError};
pub use model::{
    AppRecord, InstanceListing, RouterBinding, ServiceInstanceInfo, ServiceInstanceRecord,
    ServiceListing, Snapshot,
};
