//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    ProjectileFired { owner: ProjectileOwner },
    AsteroidDestroyed { x: f64, y: f64 },
    /// A vehicle lost one point of health.
    VehicleHit { vehicle: VehicleKind, health: u8 },
    /// Emitted once, on the tick the losing vehicle reaches zero health.
    MatchEnded {
        winner: VehicleKind,
        loser: VehicleKind,
    },
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: VehicleKind,
    pub loser: VehicleKind,
    pub tick: u64,
}
