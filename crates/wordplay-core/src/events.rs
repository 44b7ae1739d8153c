//! Events emitted by the session for audio and UI feedback.
//!
//! Engines push events into the frame's outbox; the driver drains them and
//! forwards each one to the matching capability.

use serde::{Deserialize, Serialize};

use crate::enums::{GameType, Sound, Track, VoiceProfile};
use crate::types::VoiceParams;

/// A request to speak text with a particular voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub profile: VoiceProfile,
    pub params: VoiceParams,
    /// BCP 47 language tag.
    pub lang: String,
}

/// Audio and UI side effects requested by the games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PlaySound { sound: Sound },
    PlayBackgroundTrack { track: Track },
    StopBackgroundTrack,
    Speak { utterance: Utterance },
    /// A typed answer was wrong; show what was expected.
    ShowSpellingCorrection {
        input: String,
        suggestions: Vec<String>,
    },
    /// The virtual text input gained focus.
    FocusTextInput,
    /// A level or round was cleared.
    RoundComplete { game: GameType },
    /// A full game was won; the chrome shows the congratulations overlay.
    GameComplete { game: GameType, play_count: u32 },
}

impl GameEvent {
    /// Whether this event asks for sound to start.
    pub fn is_audible(&self) -> bool {
        matches!(
            self,
            GameEvent::PlaySound { .. }
                | GameEvent::PlayBackgroundTrack { .. }
                | GameEvent::Speak { .. }
        )
    }
}
