//! Simulation: generators and the engine that bootstraps them.

pub mod engine;
pub mod generator;

pub use engine::{BootstrapReport, Simulation, SimulationEngine};
pub use generator::{Evolution, Generator, TickRange, Update};
