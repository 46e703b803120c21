//! Match state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{MatchEvent, MatchOutcome};
use crate::types::{Position, SimTime, Velocity};

/// Complete match state produced after each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub spaceship: VehicleView,
    pub ufo: VehicleView,
    pub projectiles: Vec<ProjectileView>,
    pub asteroids: Vec<Position>,
    pub attractors: Vec<Position>,
    /// Events raised during this tick only.
    pub events: Vec<MatchEvent>,
    pub outcome: Option<MatchOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub kind: VehicleKind,
    pub position: Position,
    pub velocity: Velocity,
    pub health: u8,
    pub alive: bool,
    pub visible: bool,
    /// Actions still waiting in the vehicle's script queue.
    pub queued_actions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: ProjectileOwner,
    pub position: Position,
    pub velocity: Velocity,
}

impl MatchSnapshot {
    pub fn vehicle(&self, kind: VehicleKind) -> &VehicleView {
        match kind {
            VehicleKind::Spaceship => &self.spaceship,
            VehicleKind::Ufo => &self.ufo,
        }
    }
}
