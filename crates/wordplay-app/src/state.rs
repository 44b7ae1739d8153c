//! State shared between the command reader and the loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use wordplay_core::commands::SessionCommand;
use wordplay_core::state::SessionSnapshot;

/// Messages for the loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forward to the session's command queue.
    Session(SessionCommand),
    /// Stop the loop and let the thread exit.
    Shutdown,
}

/// Handles held by the driver while the loop thread runs.
pub struct AppState {
    /// `None` until the loop is spawned.
    pub command_tx: Option<mpsc::Sender<LoopCommand>>,
    /// Snapshot from the most recent tick.
    pub latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: None,
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&self, command: SessionCommand) -> Result<(), String> {
        match self.command_tx.as_ref() {
            Some(tx) => tx
                .send(LoopCommand::Session(command))
                .map_err(|e| format!("loop thread gone: {}", e)),
            None => Err("game loop not started".into()),
        }
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
