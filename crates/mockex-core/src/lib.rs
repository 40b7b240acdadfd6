//! mockex core: series model, label sets, exposition encoding, and errors.
//!
//! This crate defines the descriptor types the exporter simulates and the
//! text exposition primitives used to render them. It carries no transport or
//! runtime dependencies so the model can be reused by tooling and tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed descriptors surface as `MockexError` instead of crashing the
//! process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod expo;
pub mod model;

/// Shared result type.
pub use error::{ErrorClass, MockexError, Result};
pub use model::{LabelSet, SeriesDescriptor, SeriesKind, TagDescriptor};
