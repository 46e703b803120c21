//! Core types and definitions for the ASTRODUEL match simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, snapshots, the level format, peer
//! packets and constants. It has no dependency on any runtime or engine.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod level;
pub mod net;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
