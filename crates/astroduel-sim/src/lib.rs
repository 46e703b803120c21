//! Match engine for ASTRODUEL.
//!
//! Owns the hecs ECS world, runs the per-frame systems on `tick(dt)`,
//! and produces `MatchSnapshot`s for the host.

pub mod engine;
pub mod registry;
pub mod scripts;
pub mod systems;
pub mod world_setup;

pub use astroduel_core as core;
pub use engine::{SimConfig, SimulationEngine};
