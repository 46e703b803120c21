//! Game loop thread: runs the match engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside the thread and never leaves it. Local
//! commands arrive via `mpsc`; peer packets arrive through an optional
//! `PeerBridge`. The latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use astroduel_core::constants::{DT, TICK_RATE};
use astroduel_core::state::MatchSnapshot;
use astroduel_sim::engine::SimulationEngine;

use crate::peer::PeerBridge;
use crate::state::{GameLoopCommand, GameLoopHandle, SharedSnapshot};

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Stop after this many ticks. Runs until shutdown when `None`.
    pub max_ticks: Option<u64>,
    /// Run as fast as possible instead of pacing to `TICK_DURATION`.
    pub unpaced: bool,
}

/// Spawn the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    peer: Option<PeerBridge>,
    options: LoopOptions,
) -> io::Result<GameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = latest_snapshot.clone();

    let thread = std::thread::Builder::new()
        .name("astroduel-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, peer.as_ref(), &shared, options))?;

    Ok(GameLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until shutdown, channel disconnect or `max_ticks`,
/// and returns the last snapshot produced.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    peer: Option<&PeerBridge>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
    options: LoopOptions,
) -> Option<MatchSnapshot> {
    let mut next_tick_time = Instant::now();
    let mut last = None;
    let mut ticks = 0u64;

    loop {
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        // 1. Drain local commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    if let Some(peer) = peer {
                        peer.forward_local(&cmd);
                    }
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shutdown requested");
                    return last;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return last,
            }
        }

        // 2. Peer packets for the remote vehicle
        if let Some(peer) = peer {
            engine.queue_commands(peer.drain_inbound());
        }

        // 3. Advance one tick, mirroring scripted actions of the local vehicle
        let snapshot = engine.tick(DT);
        ticks += 1;
        if let Some(peer) = peer {
            for cmd in engine.scripted_commands() {
                peer.forward_local(cmd);
            }
        }

        // 4. Publish
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = Some(snapshot);

        // 5. Sleep until next tick
        if options.unpaced {
            continue;
        }
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use astroduel_core::commands::{PlayerCommand, ScriptAction};
    use astroduel_core::enums::{Direction, GamePhase, VehicleKind};
    use astroduel_core::net::PeerPacket;
    use astroduel_sim::engine::SimConfig;

    fn unpaced(max_ticks: u64) -> LoopOptions {
        LoopOptions {
            max_ticks: Some(max_ticks),
            unpaced: true,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::ResetMatch))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<GameLoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_stops_after_max_ticks() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (_tx, rx) = mpsc::channel();
        let shared = Mutex::new(None);

        let last = run_game_loop(engine, rx, None, &shared, unpaced(5)).unwrap();
        assert_eq!(last.time.tick, 5);
        assert_eq!(shared.lock().unwrap().as_ref().map(|s| s.time.tick), Some(5));
    }

    #[test]
    fn test_queued_commands_reach_engine() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();

        let shared = Mutex::new(None);
        let last = run_game_loop(engine, rx, None, &shared, unpaced(3)).unwrap();
        assert_eq!(last.phase, GamePhase::Paused);
        assert_eq!(last.time.tick, 0);
    }

    #[test]
    fn test_shutdown_returns_last_snapshot() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let shared = Mutex::new(None);
        assert!(run_game_loop(engine, rx, None, &shared, LoopOptions::default()).is_none());
    }

    #[test]
    fn test_peer_packets_drive_remote_vehicle() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (in_tx, in_rx) = mpsc::channel();
        let (out_tx, out_rx) = mpsc::channel();
        let peer = PeerBridge::new(VehicleKind::Ufo, in_rx, out_tx);
        in_tx.send(r#"{"type":"shoot"}"#.to_string()).unwrap();

        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Shoot {
            vehicle: VehicleKind::Spaceship,
            degrees: 0.0,
        }))
        .unwrap();

        let shared = Mutex::new(None);
        let last = run_game_loop(engine, rx, Some(&peer), &shared, unpaced(1)).unwrap();

        assert_eq!(last.projectiles.len(), 2);
        assert!(last.projectiles.iter().any(|p| p.velocity.x < 0.0));
        assert!(last.projectiles.iter().any(|p| p.velocity.x > 0.0));
        // Only the local shot is mirrored back out.
        assert_eq!(out_rx.try_iter().count(), 1);
    }

    #[test]
    fn test_local_script_is_mirrored_to_peer() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (_in_tx, in_rx) = mpsc::channel();
        let (out_tx, out_rx) = mpsc::channel();
        let peer = PeerBridge::new(VehicleKind::Ufo, in_rx, out_tx);

        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::QueueScript {
            vehicle: VehicleKind::Spaceship,
            actions: vec![
                ScriptAction::Shoot { degrees: 0.0 },
                ScriptAction::Move {
                    direction: Direction::Up,
                },
            ],
        }))
        .unwrap();

        let shared = Mutex::new(None);
        let last = run_game_loop(engine, rx, Some(&peer), &shared, unpaced(60)).unwrap();
        assert!(last.spaceship.velocity.y < 0.0);

        let sent: Vec<Option<PeerPacket>> =
            out_rx.try_iter().map(|raw| PeerPacket::decode(&raw)).collect();
        assert_eq!(sent, vec![Some(PeerPacket::Shoot), Some(PeerPacket::Up)]);
    }

    #[test]
    fn test_remote_script_is_not_mirrored() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (_in_tx, in_rx) = mpsc::channel();
        let (out_tx, out_rx) = mpsc::channel();
        let peer = PeerBridge::new(VehicleKind::Ufo, in_rx, out_tx);

        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::QueueScript {
            vehicle: VehicleKind::Ufo,
            actions: vec![ScriptAction::Shoot { degrees: 180.0 }],
        }))
        .unwrap();

        let shared = Mutex::new(None);
        run_game_loop(engine, rx, Some(&peer), &shared, unpaced(5)).unwrap();
        assert_eq!(out_rx.try_iter().count(), 0);
    }

    #[test]
    fn test_spawned_loop_runs_and_shuts_down() {
        let engine = SimulationEngine::new(SimConfig::default());
        let handle = spawn_game_loop(engine, None, LoopOptions::default()).unwrap();
        assert!(handle.send(PlayerCommand::Pause));

        let deadline = Instant::now() + Duration::from_secs(2);
        while handle.snapshot().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.snapshot().is_some());
        assert!(handle.shutdown().is_some());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
