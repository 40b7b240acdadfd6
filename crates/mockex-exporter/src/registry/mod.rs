//! Series registry: live instances plus text exposition rendering.
//!
//! The registry is an explicit value shared through `Arc`; the engine writes
//! into it during bootstrap and the `/metrics` handler reads it on every pull.

pub mod instance;
pub mod series_registry;

pub use instance::SeriesInstance;
pub use series_registry::{SeriesRegistry, TAG_INFO_NAME};
