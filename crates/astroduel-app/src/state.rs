//! State shared between the host thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use astroduel_core::commands::PlayerCommand;
use astroduel_core::state::MatchSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A local player command to forward to the engine (and mirror to the peer).
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<MatchSnapshot>>>;

/// Handle to a running game loop.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: JoinHandle<Option<MatchSnapshot>>,
}

impl GameLoopHandle {
    /// Forward a command to the loop. Returns `false` once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Copy of the most recent snapshot, if a tick has run.
    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and wait for its final snapshot.
    pub fn shutdown(self) -> Option<MatchSnapshot> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.thread.join().ok().flatten()
    }
}
