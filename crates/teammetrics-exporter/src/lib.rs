//! teammetrics exporter library entry.
//!
//! This crate wires the tsuru API client, the refresh-and-cache engine, and
//! the metrics emitter into an HTTP exporter. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod exporter;
pub mod inventory;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
