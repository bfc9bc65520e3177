//! Metrics exposition.
//!
//! `metrics` holds the family registry and text renderer; `emitter` projects
//! the current inventory snapshot into records for the `/metrics` handler.

pub mod emitter;
pub mod metrics;

pub use emitter::{project, MetricEmitter, FAMILIES};
pub use metrics::{FamilyRegistry, MetricFamily, MetricRecord};
