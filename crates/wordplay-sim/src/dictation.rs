//! Word Hearo: hear the word in four different voices and type it back.

use glam::Vec2;

use wordplay_core::constants::*;
use wordplay_core::enums::{GameType, Key, Sound, StepOutcome, VoiceProfile};
use wordplay_core::events::{GameEvent, Utterance};
use wordplay_core::state::{DictationView, ModeView};
use wordplay_core::types::Rect;

use crate::engine::{EngineContext, GameEngine, InputState};
use crate::scheduler::Scheduler;
use crate::text::{greedy_lines, normalize_answer, TextMeasure};

/// Language tag attached to every utterance.
pub const SPEECH_LANG: &str = "en-US";

/// Typed text of the canvas input box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply an editing key. Returns `true` for Enter.
    pub fn apply_key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => return true,
            Key::Backspace => self.backspace(),
            Key::Space | Key::Char(' ') => self.push(' '),
            Key::Char(c) if c.is_ascii_alphabetic() => self.push(c),
            _ => {}
        }
        false
    }
}

/// The live round. Replaced wholesale when the next round starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DictationRound {
    /// 1-based.
    pub index: u8,
    pub voice: VoiceProfile,
    pub has_played_prompt: bool,
    pub input: TextBuffer,
    pub complete: bool,
}

impl DictationRound {
    pub fn new(index: u8) -> Self {
        Self {
            index,
            voice: VoiceProfile::for_round(index),
            has_played_prompt: false,
            input: TextBuffer::default(),
            complete: false,
        }
    }
}

/// Hit areas of the centred mic / instruction / input group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictationLayout {
    pub mic_center: Vec2,
    /// Radius of the clickable disc.
    pub mic_radius: f32,
    pub text_center: Vec2,
    /// Only present once the prompt has played and the round is open.
    pub input: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DictationTask {
    NextRound,
    ClearInput,
}

pub struct DictationEngine {
    active: bool,
    /// Lower-cased target.
    word: String,
    round: DictationRound,
    complete: bool,
    focused: bool,
    cursor_visible: bool,
    blink_ms: f32,
    scheduler: Scheduler<DictationTask>,
}

impl Default for DictationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DictationEngine {
    pub fn new() -> Self {
        Self {
            active: false,
            word: String::new(),
            round: DictationRound::new(1),
            complete: false,
            focused: false,
            cursor_visible: true,
            blink_ms: 0.0,
            scheduler: Scheduler::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn round(&self) -> &DictationRound {
        &self.round
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.word.clear();
        self.round = DictationRound::new(1);
        self.complete = false;
        self.focused = false;
        self.cursor_visible = true;
        self.blink_ms = 0.0;
        self.scheduler.invalidate();
    }

    pub fn start_game(&mut self, word: &str) {
        self.clear();
        self.word = word.to_lowercase();
        self.active = true;
        log::debug!("dictation: started with {:?}", self.word);
    }

    /// Speak the target in the current round's voice and focus the input.
    pub fn pronounce(&mut self, ctx: &mut EngineContext) {
        if !self.active || self.word.is_empty() {
            return;
        }
        let voice = self.round.voice;
        ctx.emit(GameEvent::Speak {
            utterance: Utterance {
                text: self.word.clone(),
                profile: voice,
                params: voice.params(),
                lang: SPEECH_LANG.to_string(),
            },
        });
        self.round.has_played_prompt = true;
        if !self.focused {
            self.focused = true;
            ctx.emit(GameEvent::FocusTextInput);
        }
    }

    /// Check an answer. Whitespace and case are ignored; a wrong answer is
    /// echoed back as typed.
    pub fn submit_input(&mut self, text: &str, ctx: &mut EngineContext) -> StepOutcome {
        if !self.active || self.round.complete {
            return StepOutcome::Continue;
        }
        let answer = normalize_answer(text);
        if answer.is_empty() {
            return StepOutcome::Continue;
        }

        if answer == normalize_answer(&self.word) {
            ctx.play(Sound::Correct);
            self.round.complete = true;
            self.round.input.clear();
            if self.round.index >= DICTATION_ROUNDS {
                self.complete = true;
                self.active = false;
                return StepOutcome::GameComplete;
            }
            self.scheduler.schedule(ROUND_ADVANCE_DELAY_MS, DictationTask::NextRound);
        } else {
            ctx.play(Sound::Wrong);
            ctx.emit(GameEvent::ShowSpellingCorrection {
                input: text.to_string(),
                suggestions: vec![self.word.clone()],
            });
            self.scheduler.schedule(WRONG_INPUT_CLEAR_DELAY_MS, DictationTask::ClearInput);
        }
        StepOutcome::Continue
    }

    /// Positions of the mic, instruction line and input box, vertically
    /// centred as one group.
    pub fn layout(&self, bounds: Vec2, measure: &dyn TextMeasure) -> DictationLayout {
        let center_x = bounds.x / 2.0;
        let input_visible = self.round.has_played_prompt && !self.round.complete;
        let input_size = input_box_size(self.round.input.as_str(), measure);

        let mut total = MIC_SIZE + DICTATION_SPACING + DICTATION_TEXT_HEIGHT;
        if input_visible {
            total += DICTATION_SPACING + input_size.y;
        }
        let top = (bounds.y - total) / 2.0;

        let text_top = top + MIC_SIZE + DICTATION_SPACING;
        let input_top = text_top + DICTATION_TEXT_HEIGHT + DICTATION_SPACING;
        DictationLayout {
            mic_center: Vec2::new(center_x, top + MIC_SIZE / 2.0),
            mic_radius: MIC_SIZE / 2.0 + MIC_RING,
            text_center: Vec2::new(center_x, text_top + DICTATION_TEXT_HEIGHT / 2.0),
            input: input_visible.then(|| Rect {
                origin: Vec2::new(center_x - input_size.x / 2.0, input_top),
                size: input_size,
            }),
        }
    }

    fn run_task(&mut self, task: DictationTask) -> StepOutcome {
        match task {
            DictationTask::NextRound => {
                self.round = DictationRound::new(self.round.index + 1);
                log::debug!(
                    "dictation: round {} ({})",
                    self.round.index,
                    self.round.voice.label()
                );
                StepOutcome::RoundAdvanced
            }
            DictationTask::ClearInput => {
                self.round.input.clear();
                StepOutcome::Continue
            }
        }
    }
}

/// Input box size for `text`: grows with the text width and wrapped lines.
pub fn input_box_size(text: &str, measure: &dyn TextMeasure) -> Vec2 {
    let width = if text.is_empty() {
        INPUT_MIN_WIDTH
    } else {
        (measure.measure_text(text, INPUT_FONT_PX) + INPUT_PADDING)
            .clamp(INPUT_MIN_WIDTH, INPUT_MAX_WIDTH)
    };
    let lines = greedy_lines(measure, text, INPUT_FONT_PX, width - INPUT_PADDING).len();
    let height = (lines as f32 * INPUT_LINE_HEIGHT + INPUT_PADDING).max(INPUT_MIN_HEIGHT);
    Vec2::new(width, height)
}

impl GameEngine for DictationEngine {
    fn game_type(&self) -> GameType {
        GameType::Dictation
    }

    fn begin(&mut self, ctx: &mut EngineContext) {
        self.start_game(ctx.target_word);
    }

    fn reset(&mut self, _ctx: &mut EngineContext) {
        self.clear();
    }

    fn update(&mut self, dt_ms: f32, _input: &InputState, _ctx: &mut EngineContext) -> StepOutcome {
        if self.focused {
            self.blink_ms += dt_ms;
            if self.blink_ms > CURSOR_BLINK_MS {
                self.cursor_visible = !self.cursor_visible;
                self.blink_ms = 0.0;
            }
        }

        let mut outcome = StepOutcome::Continue;
        for task in self.scheduler.advance(dt_ms as f64) {
            let result = self.run_task(task);
            if result != StepOutcome::Continue {
                outcome = result;
            }
        }
        outcome
    }

    fn handle_click(&mut self, point: Vec2, ctx: &mut EngineContext) -> StepOutcome {
        if !self.active || self.round.complete {
            return StepOutcome::Continue;
        }
        let layout = self.layout(ctx.bounds, ctx.measure);
        if point.distance(layout.mic_center) <= layout.mic_radius {
            self.pronounce(ctx);
        } else if layout.input.is_some_and(|rect| rect.contains(point)) && !self.focused {
            self.focused = true;
            ctx.emit(GameEvent::FocusTextInput);
        }
        StepOutcome::Continue
    }

    fn handle_key(&mut self, key: Key, ctx: &mut EngineContext) -> StepOutcome {
        if !self.active || self.round.complete || !self.round.has_played_prompt {
            return StepOutcome::Continue;
        }
        self.focused = true;
        if self.round.input.apply_key(key) {
            let text = self.round.input.as_str().to_string();
            return self.submit_input(&text, ctx);
        }
        StepOutcome::Continue
    }

    fn progress_label(&self) -> String {
        if self.complete {
            return "All rounds complete!".to_string();
        }
        if !self.active {
            return "Ready to start".to_string();
        }
        let status = if self.round.complete {
            "Correct!"
        } else if self.round.has_played_prompt {
            "Listening..."
        } else {
            "Click the mic to listen"
        };
        format!(
            "Round {}/{} - {} - {}",
            self.round.index,
            DICTATION_ROUNDS,
            self.round.voice.label(),
            status
        )
    }

    fn view(&self) -> ModeView {
        ModeView::Dictation(DictationView {
            active: self.active,
            round: self.round.index,
            voice: self.active.then_some(self.round.voice),
            has_played_prompt: self.round.has_played_prompt,
            round_complete: self.round.complete,
            input: self.round.input.as_str().to_string(),
            complete: self.complete,
        })
    }
}
