//! Player commands sent from input handling, scripts or a peer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::level::Level;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Vehicle control ---
    /// Set one velocity component of a vehicle to ±speed.
    Move {
        vehicle: VehicleKind,
        direction: Direction,
    },
    /// Set both velocity components from an angle (degrees, 0 = right, 90 = down).
    MoveAngle { vehicle: VehicleKind, degrees: f64 },
    /// Fire a laser from the vehicle's position.
    Shoot { vehicle: VehicleKind, degrees: f64 },

    // --- Scripting ---
    /// Append actions to a vehicle's script queue.
    QueueScript {
        vehicle: VehicleKind,
        actions: Vec<ScriptAction>,
    },
    /// Drop every pending action of a vehicle's script queue.
    ClearScript { vehicle: VehicleKind },

    // --- World ---
    /// Place an attractor ("black hole") centred at the given point.
    SpawnAttractor { x: f64, y: f64 },
    /// Replace vehicle spawns and the asteroid field with a level.
    LoadLevel { level: Level },

    // --- Match control ---
    /// Restore both vehicles and regenerate the field.
    ResetMatch,
    Pause,
    Resume,
}

/// One step of a player-programmed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Move { direction: Direction },
    MoveAngle { degrees: f64 },
    Shoot { degrees: f64 },
}

impl ScriptAction {
    /// The command this action issues for `vehicle`.
    pub fn to_command(self, vehicle: VehicleKind) -> PlayerCommand {
        match self {
            ScriptAction::Move { direction } => PlayerCommand::Move { vehicle, direction },
            ScriptAction::MoveAngle { degrees } => PlayerCommand::MoveAngle { vehicle, degrees },
            ScriptAction::Shoot { degrees } => PlayerCommand::Shoot { vehicle, degrees },
        }
    }
}
