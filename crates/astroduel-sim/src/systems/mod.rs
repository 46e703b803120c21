//! ECS systems that operate on the match world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; registries and queues are passed in by the engine.

pub mod asteroid_field;
pub mod attraction;
pub mod collision;
pub mod combat;
pub mod culling;
pub mod damping;
pub mod movement;
pub mod snapshot;
