//! mockex exporter library entry.
//!
//! This crate wires the config loader, series registry, simulation engine,
//! and HTTP surface into the exporter. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod ops;
pub mod registry;
pub mod router;
pub mod sim;
