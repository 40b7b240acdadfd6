//! Series model shared by the loader, registry, and tooling.
//!
//! - `descriptor`: what the configuration asks for (name, kind, base value).
//! - `labels`: sorted label sets and Prometheus identifier rules.
//!
//! Descriptors are immutable once loaded. Unknown kinds are carried through
//! parsing as `SeriesKind::Unknown` so a single bad entry never fails the
//! whole document.

pub mod descriptor;
pub mod labels;

pub use descriptor::{MetricType, SeriesDescriptor, SeriesKind, TagDescriptor};
pub use labels::{validate_label_name, validate_metric_name, LabelSet};
