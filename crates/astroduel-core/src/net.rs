//! Peer-to-peer input packets.
//!
//! Packets carry only an event type; there is no versioning or sequence
//! number. Packets that fail to decode are dropped by the receiver.

use serde::{Deserialize, Serialize};

use crate::commands::PlayerCommand;
use crate::enums::{Direction, VehicleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeerPacket {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    /// Declared by the wire format but not acted on.
    Asteroid,
}

impl PeerPacket {
    /// Decode a packet, returning `None` for malformed JSON or an unknown `type`.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn encode(&self) -> String {
        // A unit-variant tagged enum always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The command this packet issues for the vehicle it controls.
    pub fn into_command(self, vehicle: VehicleKind) -> Option<PlayerCommand> {
        let direction = match self {
            PeerPacket::Up => Direction::Up,
            PeerPacket::Down => Direction::Down,
            PeerPacket::Left => Direction::Left,
            PeerPacket::Right => Direction::Right,
            PeerPacket::Shoot => {
                return Some(PlayerCommand::Shoot {
                    vehicle,
                    degrees: vehicle.facing_degrees(),
                });
            }
            PeerPacket::Asteroid => return None,
        };
        Some(PlayerCommand::Move { vehicle, direction })
    }

    /// The packet that mirrors a local command to the peer, if the wire
    /// format can express it. Angled moves and shots fold to their nearest
    /// representable form: moves are dropped, shots lose their angle.
    pub fn from_command(command: &PlayerCommand) -> Option<Self> {
        match command {
            PlayerCommand::Move { direction, .. } => Some(match direction {
                Direction::Up => PeerPacket::Up,
                Direction::Down => PeerPacket::Down,
                Direction::Left => PeerPacket::Left,
                Direction::Right => PeerPacket::Right,
            }),
            PlayerCommand::Shoot { .. } => Some(PeerPacket::Shoot),
            _ => None,
        }
    }
}
