//! Session snapshot: the visible state handed to the chrome after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::Rect;

/// Complete session state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Number of ticks processed so far.
    pub frame: u64,
    pub game: GameType,
    pub is_running: bool,
    pub muted: bool,
    pub target_word: String,
    pub target_meaning: String,
    pub play_count: u32,
    pub progress_label: String,
    pub mode: ModeView,
    /// Events emitted during this tick.
    pub events: Vec<GameEvent>,
}

/// Per-mode detail of the active engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModeView {
    Shooter(ShooterView),
    Hunter(HunterView),
    Dictation(DictationView),
}

impl Default for ModeView {
    fn default() -> Self {
        ModeView::Shooter(ShooterView::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShooterView {
    pub ship: Rect,
    pub collected: String,
    pub balloons: Vec<BalloonView>,
    pub bullets: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalloonView {
    pub letter: char,
    pub position: Vec2,
    pub sprite: BalloonSprite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HunterView {
    pub phase: HunterPhase,
    pub level: u8,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: u32,
    pub word: String,
    pub rect: Rect,
    pub clicked: bool,
    pub theme: CardTheme,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictationView {
    pub active: bool,
    pub round: u8,
    pub voice: Option<VoiceProfile>,
    pub has_played_prompt: bool,
    pub round_complete: bool,
    pub input: String,
    pub complete: bool,
}
