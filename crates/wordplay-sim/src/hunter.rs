//! Word Hunter: find the correctly spelled card among misspelled ones,
//! four levels of growing grids.

use glam::Vec2;
use rand::seq::SliceRandom;

use wordplay_core::constants::*;
use wordplay_core::enums::{CardTheme, GameType, HunterPhase, Sound, StepOutcome};
use wordplay_core::state::{CardView, HunterView, ModeView};
use wordplay_core::types::Rect;

use crate::engine::{EngineContext, GameEngine, InputState};
use crate::misspell::generate_misspelled_words;
use crate::scheduler::Scheduler;
use crate::text::{to_title_case, wrap_text, TextMeasure};

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u32,
    /// Empty for preview cards.
    pub word: String,
    pub is_correct: bool,
    pub rect: Rect,
    pub clicked: bool,
    pub theme: CardTheme,
}

impl Card {
    fn new(id: u32, word: String, is_correct: bool, width: f32) -> Self {
        Self {
            id,
            word,
            is_correct,
            rect: Rect::new(0.0, 0.0, width, CARD_HEIGHT),
            clicked: false,
            theme: CardTheme::for_index(id as usize),
        }
    }
}

/// Grid shape per level: (card count, rows, columns).
pub fn level_layout(level: u8) -> (usize, usize, usize) {
    match level {
        2 => (8, 4, 2),
        3 => (16, 8, 2),
        4 => (20, 10, 2),
        _ => (4, 2, 2),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HunterTask {
    /// Move to the next level, or finish after the last one.
    Advance,
    /// Make a wrongly clicked card clickable again.
    Unmark(u32),
}

pub struct HunterEngine {
    phase: HunterPhase,
    level: u8,
    /// Title-cased target.
    word: String,
    cards: Vec<Card>,
    /// Unscaled card width of the current set.
    card_width: f32,
    advance_pending: bool,
    scheduler: Scheduler<HunterTask>,
}

impl HunterEngine {
    pub fn new(bounds: Vec2) -> Self {
        let mut engine = Self {
            phase: HunterPhase::Initial,
            level: 1,
            word: String::new(),
            cards: Vec::new(),
            card_width: CARD_WIDTH,
            advance_pending: false,
            scheduler: Scheduler::new(),
        };
        engine.generate_preview(bounds);
        engine
    }

    pub fn phase(&self) -> HunterPhase {
        self.phase
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_advance_pending(&self) -> bool {
        self.advance_pending
    }

    /// Title-case the target and show the blank 2x2 preview.
    pub fn initialize(&mut self, word: &str, bounds: Vec2) {
        self.word = to_title_case(word);
        self.phase = HunterPhase::Initial;
        self.level = 1;
        self.advance_pending = false;
        self.scheduler.invalidate();
        self.generate_preview(bounds);
    }

    pub fn start_game(&mut self, ctx: &mut EngineContext) {
        self.phase = HunterPhase::Playing;
        self.generate_cards_for_level(1, ctx);
    }

    /// Replace the card set with one correct card and misspelled distractors.
    pub fn generate_cards_for_level(&mut self, level: u8, ctx: &mut EngineContext) {
        self.scheduler.invalidate();
        self.advance_pending = false;
        self.level = level;

        let (count, rows, cols) = level_layout(level);
        let mut words = generate_misspelled_words(&self.word, count - 1, ctx.rng);
        words.push(self.word.clone());
        words.shuffle(ctx.rng);

        let longest = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        let width = if longest > CARD_WIDE_WORD_LEN {
            let widen = 1.2 + (0.02 * (longest - CARD_WIDE_WORD_LEN) as f32).min(0.3);
            (CARD_WIDTH * widen).floor()
        } else {
            CARD_WIDTH
        };

        self.card_width = width;
        self.cards = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let is_correct = word == self.word;
                Card::new(i as u32, word, is_correct, width)
            })
            .collect();
        arrange_cards(&mut self.cards, rows, cols, ctx.bounds);
        log::debug!("hunter: level {} with {} cards", level, self.cards.len());
    }

    /// Lay the current cards out again for new canvas bounds.
    pub fn relayout(&mut self, bounds: Vec2) {
        let (_, rows, cols) = level_layout(self.level);
        for card in &mut self.cards {
            card.rect.size = Vec2::new(self.card_width, CARD_HEIGHT);
        }
        arrange_cards(&mut self.cards, rows, cols, bounds);
    }

    fn generate_preview(&mut self, bounds: Vec2) {
        self.card_width = CARD_WIDTH;
        self.cards = (0..4)
            .map(|i| Card::new(i, String::new(), false, CARD_WIDTH))
            .collect();
        arrange_cards(&mut self.cards, 2, 2, bounds);
    }

    /// Hit-test the unclicked cards. Only active while playing and no level
    /// change is pending.
    pub fn click(&mut self, point: Vec2, ctx: &mut EngineContext) -> StepOutcome {
        if self.phase != HunterPhase::Playing || self.advance_pending {
            return StepOutcome::Continue;
        }
        let Some(card) = self
            .cards
            .iter_mut()
            .find(|c| !c.clicked && c.rect.contains(point))
        else {
            return StepOutcome::Continue;
        };

        card.clicked = true;
        if card.is_correct {
            ctx.play(Sound::Correct);
            self.advance_pending = true;
            self.scheduler.schedule(CORRECT_ADVANCE_DELAY_MS, HunterTask::Advance);
            if self.level >= HUNTER_LEVELS {
                return StepOutcome::GameComplete;
            }
        } else {
            ctx.play(Sound::Wrong);
            let id = card.id;
            self.scheduler.schedule(WRONG_RESET_DELAY_MS, HunterTask::Unmark(id));
        }
        StepOutcome::Continue
    }

    fn run_task(&mut self, task: HunterTask, ctx: &mut EngineContext) -> StepOutcome {
        match task {
            HunterTask::Advance if self.level < HUNTER_LEVELS => {
                self.generate_cards_for_level(self.level + 1, ctx);
                StepOutcome::RoundAdvanced
            }
            HunterTask::Advance => {
                self.phase = HunterPhase::Completed;
                self.advance_pending = false;
                StepOutcome::Continue
            }
            HunterTask::Unmark(id) => {
                if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                    card.clicked = false;
                }
                StepOutcome::Continue
            }
        }
    }
}

impl GameEngine for HunterEngine {
    fn game_type(&self) -> GameType {
        GameType::Hunter
    }

    fn begin(&mut self, ctx: &mut EngineContext) {
        self.initialize(ctx.target_word, ctx.bounds);
        self.start_game(ctx);
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        self.phase = HunterPhase::Initial;
        self.level = 1;
        self.advance_pending = false;
        self.scheduler.invalidate();
        self.generate_preview(ctx.bounds);
    }

    fn update(&mut self, dt_ms: f32, _input: &InputState, ctx: &mut EngineContext) -> StepOutcome {
        let mut outcome = StepOutcome::Continue;
        let generation = self.scheduler.generation();
        for task in self.scheduler.advance(dt_ms as f64) {
            // a regeneration earlier in this batch outdates the rest
            if self.scheduler.generation() != generation {
                log::trace!("hunter: skipping {:?} after card regeneration", task);
                continue;
            }
            let result = self.run_task(task, ctx);
            if result != StepOutcome::Continue {
                outcome = result;
            }
        }
        outcome
    }

    fn handle_click(&mut self, point: Vec2, ctx: &mut EngineContext) -> StepOutcome {
        self.click(point, ctx)
    }

    fn progress_label(&self) -> String {
        match self.phase {
            HunterPhase::Initial => "Ready to start".to_string(),
            HunterPhase::Playing => format!("Level {}/{}", self.level, HUNTER_LEVELS),
            HunterPhase::Completed => "All levels complete!".to_string(),
        }
    }

    fn view(&self) -> ModeView {
        ModeView::Hunter(HunterView {
            phase: self.phase,
            level: self.level,
            cards: self
                .cards
                .iter()
                .map(|c| CardView {
                    id: c.id,
                    word: c.word.clone(),
                    rect: c.rect,
                    clicked: c.clicked,
                    theme: c.theme,
                })
                .collect(),
        })
    }
}

/// Lay cards out row-major, shrinking the grid uniformly when it overflows
/// the area left after margins and the title band.
pub fn arrange_cards(cards: &mut [Card], rows: usize, cols: usize, bounds: Vec2) {
    let (row_width, row_height) = grid_extent(cards, rows, cols);
    let total_height = rows as f32 * row_height + rows.saturating_sub(1) as f32 * CARD_PADDING;

    let available_width = bounds.x - GRID_HORIZONTAL_MARGIN;
    let available_height = bounds.y - GRID_VERTICAL_RESERVE;
    let mut scale: f32 = 1.0;
    if row_width > available_width {
        scale = (available_width / row_width).min(0.9);
    }
    if total_height * scale > available_height {
        scale = scale.min(available_height / total_height);
    }

    let (row_width, row_height) = if scale < 1.0 {
        for card in cards.iter_mut() {
            card.rect.size = (card.rect.size * scale).floor();
        }
        grid_extent(cards, rows, cols)
    } else {
        (row_width, row_height)
    };
    let total_height = rows as f32 * row_height + rows.saturating_sub(1) as f32 * CARD_PADDING;

    let start_x = ((bounds.x - row_width) / 2.0).max(20.0);
    let start_y = ((bounds.y - total_height) / 2.0 + 30.0).max(80.0);

    for (row, row_cards) in cards.chunks_mut(cols.max(1)).take(rows).enumerate() {
        let y = start_y + row as f32 * (row_height + CARD_PADDING);
        let mut x = start_x;
        for card in row_cards {
            card.rect.origin = Vec2::new(x, y + (row_height - card.rect.height()) / 2.0);
            x += card.rect.width() + CARD_PADDING;
        }
    }
}

/// Widest row and tallest card over the grid.
fn grid_extent(cards: &[Card], rows: usize, cols: usize) -> (f32, f32) {
    let mut max_width: f32 = 0.0;
    let mut max_height: f32 = 0.0;
    for row_cards in cards.chunks(cols.max(1)).take(rows) {
        let width: f32 = row_cards.iter().map(|c| c.rect.width()).sum::<f32>()
            + row_cards.len().saturating_sub(1) as f32 * CARD_PADDING;
        max_width = max_width.max(width);
        for card in row_cards {
            max_height = max_height.max(card.rect.height());
        }
    }
    (max_width, max_height)
}

/// Horizontal padding inside a card.
pub const CARD_TEXT_PADDING: f32 = 30.0;

/// One font size shared by every card: the largest in 24..=10 at which each
/// word fits on one line or wrapped, clamped to 12..=20.
pub fn fit_font_size(cards: &[Card], measure: &dyn TextMeasure) -> f32 {
    let mut shared: f32 = 24.0;
    for card in cards.iter().filter(|c| !c.word.is_empty()) {
        let max_width = card.rect.width() - CARD_TEXT_PADDING;
        let max_height = card.rect.height() - 20.0;
        let mut size: f32 = 24.0;
        while size >= 10.0 {
            if measure.measure_text(&card.word, size) <= max_width && size <= max_height {
                break;
            }
            let lines = wrap_text(measure, &card.word, size, max_width);
            if lines.len() as f32 * (size + 2.0) <= max_height {
                break;
            }
            size -= 1.0;
        }
        shared = shared.min(size);
    }
    shared.clamp(12.0, 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMeasure;

    fn blank_cards(n: u32, width: f32) -> Vec<Card> {
        (0..n).map(|i| Card::new(i, String::new(), false, width)).collect()
    }

    #[test]
    fn test_level_layouts() {
        assert_eq!(level_layout(1), (4, 2, 2));
        assert_eq!(level_layout(2), (8, 4, 2));
        assert_eq!(level_layout(3), (16, 8, 2));
        assert_eq!(level_layout(4), (20, 10, 2));
    }

    #[test]
    fn test_small_grid_is_centred_unscaled() {
        let mut cards = blank_cards(4, CARD_WIDTH);
        arrange_cards(&mut cards, 2, 2, Vec2::new(1024.0, 768.0));
        // 2 * 400 + 12 = 812 wide, 2 * 80 + 12 = 172 tall
        assert_eq!(cards[0].rect, Rect::new(106.0, 328.0, 400.0, 80.0));
        assert_eq!(cards[1].rect.x(), 518.0);
        assert_eq!(cards[2].rect.y(), 420.0);
    }

    #[test]
    fn test_tall_grid_shrinks_to_fit() {
        let bounds = Vec2::new(1024.0, 768.0);
        let mut cards = blank_cards(20, CARD_WIDTH);
        arrange_cards(&mut cards, 10, 2, bounds);
        let bottom = cards.iter().map(|c| c.rect.bottom()).fold(0.0, f32::max);
        assert!(cards[0].rect.height() < CARD_HEIGHT);
        assert!(bottom <= bounds.y);
        assert!(cards[0].rect.y() >= 80.0);
        assert!(cards.iter().all(|c| c.rect.x() >= 20.0));
    }

    #[test]
    fn test_wide_grid_scale_capped() {
        let mut cards = blank_cards(4, 600.0);
        arrange_cards(&mut cards, 2, 2, Vec2::new(1024.0, 768.0));
        // 1212 > 984, scale = min(0.9, 984/1212) ~ 0.81
        assert!(cards[0].rect.width() <= 600.0 * 0.9);
        assert_eq!(cards[0].rect.width(), (600.0f32 * (984.0 / 1212.0)).floor());
    }

    #[test]
    fn test_font_size_clamped() {
        let measure = MonospaceMeasure::default();
        let mut cards = blank_cards(2, CARD_WIDTH);
        cards[0].word = "Dog".into();
        assert_eq!(fit_font_size(&cards, &measure), 20.0);

        cards[1].word = "Pneumonoultramicroscopicsilicovolcanoconiosis".into();
        cards[1].rect.size = Vec2::new(120.0, 40.0);
        assert_eq!(fit_font_size(&cards, &measure), 12.0);
    }

    #[test]
    fn test_preview_has_blank_cards() {
        let engine = HunterEngine::new(Vec2::new(1024.0, 768.0));
        assert_eq!(engine.phase(), HunterPhase::Initial);
        assert_eq!(engine.cards().len(), 4);
        assert!(engine.cards().iter().all(|c| c.word.is_empty() && !c.is_correct));
        assert_eq!(engine.progress_label(), "Ready to start");
    }
}
