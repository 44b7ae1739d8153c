//! Commands sent from the UI chrome to the session.
//!
//! Commands are queued and processed at the next tick boundary, so input that
//! arrives between frames is consumed by the following update.

use serde::{Deserialize, Serialize};

use crate::enums::Key;

/// All possible player and chrome actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    // --- Word management ---
    /// Set the practice word and its meaning.
    SetTargetWord { word: String, meaning: String },
    /// Forget the current word, meaning and play count.
    ClearTarget,

    // --- Run control ---
    /// Start (or resume) the active game.
    Start,
    /// Pause the active game.
    Pause,
    /// Start when paused, pause when running.
    TogglePause,
    /// Cycle to the next game mode.
    SwitchMode,
    /// Mute or unmute sound effects and music.
    ToggleMute,
    /// Ask the dictation game to speak the word again.
    Pronounce,

    // --- Raw input ---
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Pointer click in canvas-local pixels.
    Click { x: f32, y: f32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
}
