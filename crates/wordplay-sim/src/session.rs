//! Session controller: the one owner of the target word, the active mode,
//! the run flag and the play count.
//!
//! `Session` holds all three engines at once, queues commands between
//! frames, drives the active engine on `tick` and turns the engines'
//! `StepOutcome`s into play counting and UI events. Completely headless.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use wordplay_core::commands::SessionCommand;
use wordplay_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use wordplay_core::enums::{GameType, Key, StepOutcome};
use wordplay_core::error::SessionError;
use wordplay_core::events::GameEvent;
use wordplay_core::state::{ModeView, SessionSnapshot};

use crate::dictation::DictationEngine;
use crate::engine::{EngineContext, GameEngine, InputState};
use crate::hunter::HunterEngine;
use crate::shooter::ShooterEngine;
use crate::text::{MonospaceMeasure, TextMeasure};

/// Configuration for a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. Same seed and command stream give the same session.
    pub seed: u64,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Start with sound effects and music suppressed.
    pub muted: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            muted: false,
        }
    }
}

/// What the session asks of the active engine.
#[derive(Debug, Clone, Copy)]
enum EngineCall {
    Begin,
    Update(f32),
    Click(Vec2),
    Key(Key),
    Pronounce,
}

pub struct Session {
    bounds: Vec2,
    rng: ChaCha8Rng,
    measure: Box<dyn TextMeasure + Send>,
    game: GameType,
    running: bool,
    /// The active engine was configured for the current word.
    initialized: bool,
    muted: bool,
    target_word: String,
    target_meaning: String,
    play_count: u32,
    frame: u64,
    input: InputState,
    shooter: ShooterEngine,
    hunter: HunterEngine,
    dictation: DictationEngine,
    command_queue: VecDeque<SessionCommand>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Session measuring text with a fixed-advance font.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_measure(config, Box::new(MonospaceMeasure::default()))
    }

    /// Session using `measure` for layout hit-tests. Pass the measurer that
    /// matches the canvas the session is drawn on.
    pub fn with_measure(config: SessionConfig, measure: Box<dyn TextMeasure + Send>) -> Self {
        let bounds = Vec2::new(config.canvas_width, config.canvas_height);
        Self {
            bounds,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            measure,
            game: GameType::default(),
            running: false,
            initialized: false,
            muted: config.muted,
            target_word: String::new(),
            target_meaning: String::new(),
            play_count: 0,
            frame: 0,
            input: InputState::default(),
            shooter: ShooterEngine::new(bounds),
            hunter: HunterEngine::new(bounds),
            dictation: DictationEngine::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    // --- Commands ---

    /// Store a new word and meaning. The word is kept upper-cased; a
    /// different word resets progress and stops a running game.
    pub fn set_target_word(&mut self, word: &str, meaning: &str) -> Result<(), SessionError> {
        let word = word.trim();
        let meaning = meaning.trim();
        if word.is_empty() {
            return Err(SessionError::EmptyWord);
        }
        if meaning.is_empty() {
            return Err(SessionError::EmptyMeaning);
        }

        let word = word.to_uppercase();
        if word != self.target_word {
            log::info!("target word set to {:?}", word);
            self.stop();
            self.target_word = word;
            self.play_count = 0;
            self.initialized = false;
            self.reset_engines();
        }
        self.target_meaning = meaning.to_string();
        Ok(())
    }

    /// Forget the word and meaning, zero the play count.
    pub fn clear_target(&mut self) {
        log::info!("target cleared");
        self.stop();
        self.target_word.clear();
        self.target_meaning.clear();
        self.play_count = 0;
        self.initialized = false;
        self.reset_engines();
    }

    /// Run the active game. The engine is configured only once per word, so
    /// pausing and starting again keeps its entities.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.target_word.is_empty() {
            return Err(SessionError::NoTargetWord);
        }
        if self.running {
            return Ok(());
        }
        if !self.initialized {
            self.call_active(EngineCall::Begin);
            self.initialized = true;
        }
        self.running = true;
        if let Some(track) = self.game.background_track() {
            self.emit(GameEvent::PlayBackgroundTrack { track });
        }
        log::info!("{} started for {:?}", self.game.display_name(), self.target_word);
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.running {
            self.stop();
            log::info!("{} paused", self.game.display_name());
        }
    }

    pub fn toggle_pause(&mut self) -> Result<(), SessionError> {
        if self.running {
            self.pause();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Cycle Shooter → Hunter → Dictation. Any run is stopped and every
    /// engine goes back to its idle state.
    pub fn switch_mode(&mut self) {
        self.stop();
        self.game = self.game.next();
        self.initialized = false;
        self.reset_engines();
        log::info!("switched to {}", self.game.display_name());
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if self.muted {
            self.emit(GameEvent::StopBackgroundTrack);
        } else if self.running {
            if let Some(track) = self.game.background_track() {
                self.emit(GameEvent::PlayBackgroundTrack { track });
            }
        }
        log::info!("sound {}", if self.muted { "muted" } else { "on" });
    }

    /// Change the canvas size. Card grids are laid out again and the ship is
    /// kept on screen. Non-finite or non-positive sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.bounds = Vec2::new(width, height);
        self.hunter.relayout(self.bounds);
        self.shooter.fit_to_bounds(self.bounds);
    }

    /// Queue a command for processing at the next tick.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process queued commands, then advance the active engine by `dt_ms`
    /// when running. Returns the snapshot carrying this frame's events.
    pub fn tick(&mut self, dt_ms: f32) -> SessionSnapshot {
        self.process_commands();

        if self.running {
            let outcome = self.call_active(EngineCall::Update(dt_ms.max(0.0)));
            self.finish_step(outcome);
        }
        self.frame += 1;

        let mut snapshot = self.snapshot();
        snapshot.events = std::mem::take(&mut self.events);
        snapshot
    }

    /// Drain events emitted since the last tick or drain.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Queries ---

    pub fn game_type(&self) -> GameType {
        self.game
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn target_meaning(&self) -> &str {
        &self.target_meaning
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        &*self.measure
    }

    pub fn shooter(&self) -> &ShooterEngine {
        &self.shooter
    }

    pub fn hunter(&self) -> &HunterEngine {
        &self.hunter
    }

    pub fn dictation(&self) -> &DictationEngine {
        &self.dictation
    }

    pub fn progress_label(&self) -> String {
        self.active_engine().progress_label()
    }

    /// Current state without pending events.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            frame: self.frame,
            game: self.game,
            is_running: self.running,
            muted: self.muted,
            target_word: self.target_word.clone(),
            target_meaning: self.target_meaning.clone(),
            play_count: self.play_count,
            progress_label: self.progress_label(),
            mode: self.mode_view(),
            events: Vec::new(),
        }
    }

    fn mode_view(&self) -> ModeView {
        self.active_engine().view()
    }

    fn active_engine(&self) -> &dyn GameEngine {
        match self.game {
            GameType::Shooter => &self.shooter,
            GameType::Hunter => &self.hunter,
            GameType::Dictation => &self.dictation,
        }
    }

    #[cfg(test)]
    pub(crate) fn shooter_mut(&mut self) -> &mut ShooterEngine {
        &mut self.shooter
    }

    #[cfg(test)]
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    // --- Internals ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SetTargetWord { word, meaning } => {
                if let Err(err) = self.set_target_word(&word, &meaning) {
                    log::warn!("rejected word {:?}: {}", word, err);
                }
            }
            SessionCommand::ClearTarget => self.clear_target(),
            SessionCommand::Start => {
                if let Err(err) = self.start() {
                    log::warn!("cannot start: {}", err);
                }
            }
            SessionCommand::Pause => self.pause(),
            SessionCommand::TogglePause => {
                if let Err(err) = self.toggle_pause() {
                    log::warn!("cannot start: {}", err);
                }
            }
            SessionCommand::SwitchMode => self.switch_mode(),
            SessionCommand::ToggleMute => self.toggle_mute(),
            SessionCommand::Pronounce => {
                if self.running {
                    self.call_active(EngineCall::Pronounce);
                }
            }
            SessionCommand::KeyDown { key } => {
                if let Key::Arrow(direction) = key {
                    self.input.press(direction);
                }
                if self.running {
                    let outcome = self.call_active(EngineCall::Key(key));
                    self.finish_step(outcome);
                }
            }
            SessionCommand::KeyUp { key } => {
                if let Key::Arrow(direction) = key {
                    self.input.release(direction);
                }
            }
            SessionCommand::Click { x, y } => {
                if self.running {
                    let outcome = self.call_active(EngineCall::Click(Vec2::new(x, y)));
                    self.finish_step(outcome);
                }
            }
            SessionCommand::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Interpret an engine's outcome. The only place play count changes.
    fn finish_step(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Continue => {}
            StepOutcome::RoundAdvanced => {
                log::debug!("{}: {}", self.game.display_name(), self.progress_label());
                self.emit(GameEvent::RoundComplete { game: self.game });
            }
            StepOutcome::GameComplete => {
                self.play_count += 1;
                log::info!(
                    "{} complete for {:?}, play count {}",
                    self.game.display_name(),
                    self.target_word,
                    self.play_count
                );
                self.emit(GameEvent::GameComplete {
                    game: self.game,
                    play_count: self.play_count,
                });
                self.stop();
                self.initialized = false;
                self.reset_engines();
            }
        }
    }

    /// Clear the run flag and silence the music.
    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.emit(GameEvent::StopBackgroundTrack);
        }
        self.input.clear();
    }

    fn emit(&mut self, event: GameEvent) {
        if self.muted
            && matches!(
                event,
                GameEvent::PlaySound { .. } | GameEvent::PlayBackgroundTrack { .. }
            )
        {
            log::trace!("muted: {:?}", event);
            return;
        }
        self.events.push(event);
    }

    fn call_active(&mut self, call: EngineCall) -> StepOutcome {
        let mut outbox = Vec::new();
        let outcome = {
            let mut ctx = EngineContext {
                target_word: &self.target_word,
                bounds: self.bounds,
                rng: &mut self.rng,
                events: &mut outbox,
                measure: &*self.measure,
            };
            let engine: &mut dyn GameEngine = match self.game {
                GameType::Shooter => &mut self.shooter,
                GameType::Hunter => &mut self.hunter,
                GameType::Dictation => &mut self.dictation,
            };
            match call {
                EngineCall::Begin => {
                    engine.begin(&mut ctx);
                    StepOutcome::Continue
                }
                EngineCall::Update(dt_ms) => engine.update(dt_ms, &self.input, &mut ctx),
                EngineCall::Click(point) => engine.handle_click(point, &mut ctx),
                EngineCall::Key(key) => engine.handle_key(key, &mut ctx),
                EngineCall::Pronounce => {
                    if self.game == GameType::Dictation {
                        self.dictation.pronounce(&mut ctx);
                    }
                    StepOutcome::Continue
                }
            }
        };
        for event in outbox {
            self.emit(event);
        }
        outcome
    }

    fn reset_engines(&mut self) {
        let mut outbox = Vec::new();
        {
            let mut ctx = EngineContext {
                target_word: &self.target_word,
                bounds: self.bounds,
                rng: &mut self.rng,
                events: &mut outbox,
                measure: &*self.measure,
            };
            self.shooter.reset(&mut ctx);
            self.hunter.reset(&mut ctx);
            self.dictation.reset(&mut ctx);
        }
        for event in outbox {
            self.emit(event);
        }
    }
}
