//! ASTRODUEL host.
//!
//! Runs the match engine on a fixed-rate loop thread, bridges peer packets
//! to the remote vehicle and reads and writes level files.

pub mod game_loop;
pub mod level_io;
pub mod peer;
pub mod state;

pub use astroduel_core as core;
