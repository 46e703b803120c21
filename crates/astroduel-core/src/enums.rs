//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{SPACESHIP_FACING_DEGREES, UFO_FACING_DEGREES};

/// The two player-controlled crafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Spaceship,
    Ufo,
}

/// Which laser a projectile is. Set at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    SpaceshipLaser,
    UfoLaser,
}

/// Cardinal movement direction in screen space (up = −y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Top-level match state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// One vehicle was destroyed. Terminal until the match is reset.
    Ended,
}

/// How an attractor's pull scales with distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttractorFalloff {
    /// Adds the raw unit vector toward the attractor every tick.
    #[default]
    Unit,
    /// Adds `strength / d²` toward the attractor, with `d` clamped to `min_distance`.
    InverseSquare { strength: f64, min_distance: f64 },
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 2] = [VehicleKind::Spaceship, VehicleKind::Ufo];

    /// The laser this vehicle fires.
    pub fn laser(self) -> ProjectileOwner {
        match self {
            VehicleKind::Spaceship => ProjectileOwner::SpaceshipLaser,
            VehicleKind::Ufo => ProjectileOwner::UfoLaser,
        }
    }

    pub fn opponent(self) -> VehicleKind {
        match self {
            VehicleKind::Spaceship => VehicleKind::Ufo,
            VehicleKind::Ufo => VehicleKind::Spaceship,
        }
    }

    /// Firing angle used when a shot carries no angle of its own.
    pub fn facing_degrees(self) -> f64 {
        match self {
            VehicleKind::Spaceship => SPACESHIP_FACING_DEGREES,
            VehicleKind::Ufo => UFO_FACING_DEGREES,
        }
    }
}

impl ProjectileOwner {
    /// The vehicle that fires this laser.
    pub fn shooter(self) -> VehicleKind {
        match self {
            ProjectileOwner::SpaceshipLaser => VehicleKind::Spaceship,
            ProjectileOwner::UfoLaser => VehicleKind::Ufo,
        }
    }

    /// Whether a shot of this kind can damage `vehicle`.
    pub fn can_hit(self, vehicle: VehicleKind) -> bool {
        self.shooter() != vehicle
    }
}

impl Direction {
    /// Unit step for this direction in screen space.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}
