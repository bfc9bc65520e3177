//! Top-level facade crate for teammetrics.
//!
//! Re-exports the core model and the exporter library so users can depend on a single crate.

pub mod core {
    pub use teammetrics_core::*;
}

pub mod exporter {
    pub use teammetrics_exporter::*;
}
