//! Exposition primitives.
//!
//! Only the Prometheus text format (version 0.0.4) is supported. Writers here
//! are infallible: they append to a `String` and never allocate per sample
//! beyond label escaping.

pub mod text;

pub use text::{escape_label, format_value, write_family_header, write_sample, CONTENT_TYPE};
