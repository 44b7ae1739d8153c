//! The seam between the session and the three mode engines.
//!
//! Engines never see the `Session`. Every call receives an `EngineContext`
//! borrowing exactly what it may touch: the target word, the canvas bounds,
//! the session RNG, the frame's event outbox and a text measurer.

use std::collections::HashSet;

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use wordplay_core::enums::{Direction, GameType, Key, Sound, StepOutcome};
use wordplay_core::events::GameEvent;
use wordplay_core::state::ModeView;

use crate::text::TextMeasure;

/// Per-call borrow of session state handed to an engine.
pub struct EngineContext<'a> {
    /// Target word as stored by the session (upper-cased).
    pub target_word: &'a str,
    /// Canvas size in pixels.
    pub bounds: Vec2,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<GameEvent>,
    pub measure: &'a dyn TextMeasure,
}

impl EngineContext<'_> {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: Sound) {
        self.events.push(GameEvent::PlaySound { sound });
    }
}

/// Arrow keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Direction>,
}

impl InputState {
    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Behaviour shared by the three mini-games.
///
/// `update`, `handle_click` and `handle_key` all report a `StepOutcome`; the
/// session is the only place that interprets it.
pub trait GameEngine {
    fn game_type(&self) -> GameType;

    /// Configure a fresh run for `ctx.target_word`.
    fn begin(&mut self, ctx: &mut EngineContext);

    /// Drop all entities and pending work, returning to the idle state.
    fn reset(&mut self, ctx: &mut EngineContext);

    /// Advance by `dt_ms` of wall-clock time. Only called while running.
    fn update(&mut self, dt_ms: f32, input: &InputState, ctx: &mut EngineContext) -> StepOutcome;

    fn handle_click(&mut self, _point: Vec2, _ctx: &mut EngineContext) -> StepOutcome {
        StepOutcome::Continue
    }

    fn handle_key(&mut self, _key: Key, _ctx: &mut EngineContext) -> StepOutcome {
        StepOutcome::Continue
    }

    fn progress_label(&self) -> String;

    /// Serializable view for the snapshot.
    fn view(&self) -> ModeView;
}
