//! Headless stigmergy sandbox: ~10,000 steering agents coordinating through
//! a diffusing dual-channel pheromone field at a fixed 60Hz step.
//!
//! The renderer and UI layers live elsewhere; this crate is the simulation
//! core plus the fixed-timestep driver.

pub mod agent;
pub mod app;
pub mod config;
pub mod debug;
pub mod engine;
pub mod pheromone;
pub mod sim;
pub mod spatial;
pub mod steering;
pub mod vec2ext;
pub mod world;
