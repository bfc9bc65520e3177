//! Inventory model (apps + service instances) and tsuru wire decoding.
//!
//! Records are decoded from the tsuru API JSON shapes through private wire
//! structs and exposed as plain domain types. All decoders are panic-free:
//! malformed bodies surface as `TeamMetricsError::Upstream`.

pub mod app;
pub mod service;
pub mod snapshot;
pub mod wire;

pub use app::{AppRecord, RouterBinding};
pub use service::{InstanceListing, ServiceInstanceInfo, ServiceInstanceRecord, ServiceListing};
pub use snapshot::Snapshot;
