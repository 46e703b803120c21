//! Bridge between the game loop and a remote peer.
//!
//! The transport is not ours: the host hands over one channel of raw
//! inbound packets and one for outbound ones. Inbound packets drive the
//! remote vehicle; local commands for the other vehicle are mirrored out.

use std::sync::mpsc;

use tracing::{debug, trace};

use astroduel_core::commands::PlayerCommand;
use astroduel_core::enums::VehicleKind;
use astroduel_core::net::PeerPacket;

pub struct PeerBridge {
    remote: VehicleKind,
    inbound: mpsc::Receiver<String>,
    outbound: mpsc::Sender<String>,
}

impl PeerBridge {
    /// `remote` is the vehicle the peer controls.
    pub fn new(
        remote: VehicleKind,
        inbound: mpsc::Receiver<String>,
        outbound: mpsc::Sender<String>,
    ) -> Self {
        Self {
            remote,
            inbound,
            outbound,
        }
    }

    /// Commands for every packet received since the last call.
    /// Malformed and unhandled packets are dropped.
    pub fn drain_inbound(&self) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        while let Ok(raw) = self.inbound.try_recv() {
            match PeerPacket::decode(&raw) {
                Some(packet) => {
                    trace!(?packet, "peer packet");
                    commands.extend(packet.into_command(self.remote));
                }
                None => debug!(raw = %raw, "dropped malformed peer packet"),
            }
        }
        commands
    }

    /// Mirror a local command to the peer if it moves or fires the local vehicle.
    /// Returns whether a packet went out.
    pub fn forward_local(&self, command: &PlayerCommand) -> bool {
        let targets_local = match command {
            PlayerCommand::Move { vehicle, .. } | PlayerCommand::Shoot { vehicle, .. } => {
                *vehicle != self.remote
            }
            _ => false,
        };
        if !targets_local {
            return false;
        }
        let Some(packet) = PeerPacket::from_command(command) else {
            return false;
        };
        self.outbound.send(packet.encode()).is_ok()
    }
}
