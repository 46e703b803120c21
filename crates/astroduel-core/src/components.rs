//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the only
//! methods here are the small state guards every system relies on.

use serde::{Deserialize, Serialize};

use crate::constants::VEHICLE_MAX_HEALTH;
use crate::enums::*;
use crate::types::Position;

/// Physical presence of an entity: an axis-aligned box centred on its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub half_width: f64,
    pub half_height: f64,
    /// Disabled bodies take no part in movement or collision detection.
    pub enabled: bool,
    pub visible: bool,
    /// Immovable bodies never receive a separation push or velocity change.
    pub immovable: bool,
}

impl Body {
    pub fn square(half_extent: f64) -> Self {
        Self {
            half_width: half_extent,
            half_height: half_extent,
            enabled: true,
            visible: true,
            immovable: false,
        }
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    /// Disable and hide the body. Returns `false` if it was already disabled.
    pub fn disable(&mut self) -> bool {
        let was_enabled = self.enabled;
        self.enabled = false;
        self.visible = false;
        was_enabled
    }

    /// Enable and show the body. Returns `false` if it was already enabled.
    pub fn enable(&mut self) -> bool {
        let was_disabled = !self.enabled;
        self.enabled = true;
        self.visible = true;
        was_disabled
    }
}

/// A player-controlled craft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub kind: VehicleKind,
    /// Speed applied by directional commands (pixels/s).
    pub speed: f64,
    pub health: u8,
    pub alive: bool,
    pub spawn: Position,
    pub spawn_speed: f64,
}

impl Vehicle {
    pub fn new(kind: VehicleKind, spawn: Position, speed: f64) -> Self {
        Self {
            kind,
            speed,
            health: VEHICLE_MAX_HEALTH,
            alive: true,
            spawn,
            spawn_speed: speed,
        }
    }

    /// The laser this vehicle fires.
    pub fn laser(&self) -> ProjectileOwner {
        self.kind.laser()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// A fired shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
}

/// Marks a static obstacle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid;

/// Marks a point that pulls projectiles toward its centre.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attractor;
