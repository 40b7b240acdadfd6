//! Top-level facade crate for mockex.
//!
//! Re-exports the core model and the exporter library so users can depend on
//! a single crate.

pub mod core {
    pub use mockex_core::*;
}

pub mod exporter {
    pub use mockex_exporter::*;
}
