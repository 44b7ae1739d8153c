//! Frame drawing, independent of simulation.
//!
//! `draw_frame` reads the session and issues draw calls on a caller-owned
//! `Canvas`. Nothing here mutates game state, so a paused session keeps
//! rendering the same frame.

use glam::Vec2;

use wordplay_core::constants::*;
use wordplay_core::enums::{CardTheme, GameType, HunterPhase};
use wordplay_core::types::{Color, Rect};

use crate::dictation::DictationEngine;
use crate::hunter::{fit_font_size, HunterEngine, CARD_TEXT_PADDING};
use crate::session::Session;
use crate::shooter::{Balloon, Bullet, Position, ShooterEngine};
use crate::text::{greedy_lines, wrap_text, MonospaceMeasure, TextMeasure};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Left-to-right (or top-to-bottom for full-height fills) blend.
    Linear { from: Color, to: Color },
    /// Centre-out blend.
    Radial { inner: Color, outer: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_px: f32,
    pub bold: bool,
    pub color: Color,
    /// Stroke drawn under the fill.
    pub outline: Option<Color>,
    pub align: Align,
    pub baseline: Baseline,
}

impl TextStyle {
    pub fn new(font_px: f32, color: Color) -> Self {
        Self {
            font_px,
            bold: false,
            color,
            outline: None,
            align: Align::Center,
            baseline: Baseline::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn outlined(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    pub fn aligned(mut self, align: Align, baseline: Baseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }
}

/// Drawing surface supplied by the platform.
pub trait Canvas: TextMeasure {
    fn size(&self) -> Vec2;
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint);
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32);
    fn text(&mut self, text: &str, at: Vec2, style: &TextStyle);
    /// Draw a named image asset stretched over `rect`.
    fn sprite(&mut self, asset: &str, rect: Rect);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, color: Color },
    FillRoundedRect { rect: Rect, radius: f32, paint: Paint },
    StrokeRoundedRect { rect: Rect, radius: f32, color: Color },
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { text: String, at: Vec2, style: TextStyle },
    Sprite { asset: String, rect: Rect },
}

/// Canvas that records calls instead of drawing. Measures text with a
/// fixed advance.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Vec2,
    measure: MonospaceMeasure,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            measure: MonospaceMeasure::default(),
            calls: Vec::new(),
        }
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sprite asset names in draw order.
    pub fn sprites(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite { asset, .. } => Some(asset.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TextMeasure for RecordingCanvas {
    fn measure_text(&self, text: &str, font_px: f32) -> f32 {
        self.measure.measure_text(text, font_px)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.calls.push(DrawCall::FillRect { rect, paint });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _line_width: f32) {
        self.calls.push(DrawCall::StrokeRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::FillRoundedRect { rect, radius, paint });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, _line_width: f32) {
        self.calls.push(DrawCall::StrokeRoundedRect { rect, radius, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::FillCircle { center, radius, paint });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, _line_width: f32) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }

    fn sprite(&mut self, asset: &str, rect: Rect) {
        self.calls.push(DrawCall::Sprite {
            asset: asset.to_string(),
            rect,
        });
    }
}

/// Lets layout helpers that take `&dyn TextMeasure` measure on a canvas.
struct CanvasMeasure<'a>(&'a dyn Canvas);

impl TextMeasure for CanvasMeasure<'_> {
    fn measure_text(&self, text: &str, font_px: f32) -> f32 {
        self.0.measure_text(text, font_px)
    }
}

// --- Palette ---

const BACKGROUND_TOP: Color = Color::hex(0x1B005B);
const BACKGROUND_BOTTOM: Color = Color::hex(0x2D006D);
const BULLET_COLOR: Color = Color::hex(0xFFFF00);
const CARD_BORDER: Color = Color::hex(0x333333);
const MIC_IDLE: Color = Color::hex(0xFF6B6B);
const SUCCESS: Color = Color::hex(0x4CAF50);
const INPUT_TEXT: Color = Color::hex(0x333333);
const PLACEHOLDER: Color = Color::hex(0x999999);
const BAR_TRACK: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0x33);
const BAR_BORDER: Color = Color::rgba(0x00, 0x00, 0x00, 0x4D);
const TICK_DIM: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0x80);

/// Gradient (centre, edge) of a card theme.
pub fn theme_colors(theme: CardTheme) -> (Color, Color) {
    match theme {
        CardTheme::Pink => (Color::hex(0xFFB6B6), Color::hex(0x996D6D)),
        CardTheme::Orange => (Color::hex(0xFF9B04), Color::hex(0x995D02)),
        CardTheme::Blue => (Color::hex(0x58D7FF), Color::hex(0x358199)),
        CardTheme::Yellow => (Color::hex(0xFFE178), Color::hex(0x998748)),
        CardTheme::Green => (Color::hex(0xD7FFD0), Color::hex(0x81997D)),
    }
}

/// Draw one frame: background, game title, then the active mode.
pub fn draw_frame(session: &Session, canvas: &mut dyn Canvas) {
    let size = canvas.size();
    canvas.fill_rect(
        Rect {
            origin: Vec2::ZERO,
            size,
        },
        Paint::Linear {
            from: BACKGROUND_TOP,
            to: BACKGROUND_BOTTOM,
        },
    );
    draw_title(session.game_type(), canvas);

    match session.game_type() {
        GameType::Shooter => draw_shooter(session.shooter(), canvas),
        GameType::Hunter => draw_hunter(session.hunter(), canvas),
        GameType::Dictation => draw_dictation(session.dictation(), canvas),
    }
}

fn draw_title(game: GameType, canvas: &mut dyn Canvas) {
    let style = TextStyle::new(TITLE_FONT_PX, Color::WHITE)
        .bold()
        .outlined(Color::BLACK)
        .aligned(Align::Center, Baseline::Top);
    let at = Vec2::new(canvas.size().x / 2.0, 20.0);
    canvas.text(game.display_name(), at, &style);
}

fn draw_shooter(shooter: &ShooterEngine, canvas: &mut dyn Canvas) {
    let height = canvas.size().y;
    canvas.sprite("spaceship", shooter.ship().rect());

    let letter_style = TextStyle::new(24.0, Color::BLACK).bold();
    for (_entity, (pos, balloon)) in shooter.world().query::<(&Position, &Balloon)>().iter() {
        // only what is on screen
        if pos.0.y + BALLOON_SIZE <= 0.0 || pos.0.y >= height {
            continue;
        }
        let rect = Rect {
            origin: pos.0,
            size: Vec2::splat(BALLOON_SIZE),
        };
        canvas.sprite(balloon.sprite.asset(), rect);
        canvas.text(&balloon.letter.to_string(), rect.center(), &letter_style);
    }

    for (_entity, (pos, _bullet)) in shooter.world().query::<(&Position, &Bullet)>().iter() {
        canvas.fill_rect(
            Rect {
                origin: pos.0,
                size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            },
            Paint::Solid(BULLET_COLOR),
        );
    }
}

fn draw_hunter(hunter: &HunterEngine, canvas: &mut dyn Canvas) {
    let playing = hunter.phase() == HunterPhase::Playing;
    let font_px = fit_font_size(hunter.cards(), &CanvasMeasure(&*canvas));

    for card in hunter.cards() {
        let (inner, outer) = theme_colors(card.theme);
        canvas.fill_rounded_rect(card.rect, CARD_CORNER_RADIUS, Paint::Radial { inner, outer });
        canvas.stroke_rounded_rect(card.rect, CARD_CORNER_RADIUS, CARD_BORDER, 2.0);

        if !playing || card.word.is_empty() {
            continue;
        }
        let lines = wrap_text(
            &CanvasMeasure(&*canvas),
            &card.word,
            font_px,
            card.rect.width() - CARD_TEXT_PADDING,
        );
        let line_height = font_px + 2.0;
        let top = card.rect.y() + (card.rect.height() - lines.len() as f32 * line_height) / 2.0
            + line_height / 2.0;
        let style = TextStyle::new(font_px, Color::BLACK);
        for (i, line) in lines.iter().enumerate() {
            let at = Vec2::new(card.rect.center().x, top + i as f32 * line_height);
            canvas.text(line, at, &style);
        }
    }

    if playing {
        draw_progress(
            canvas,
            &format!("Level {}/{}", hunter.level(), HUNTER_LEVELS),
            hunter.level(),
            HUNTER_LEVELS,
            (SUCCESS, Color::hex(0x66BB6A)),
        );
    }
}

fn draw_dictation(dictation: &DictationEngine, canvas: &mut dyn Canvas) {
    if !dictation.is_active() && !dictation.is_complete() {
        return;
    }
    let round = dictation.round();
    let layout = dictation.layout(canvas.size(), &CanvasMeasure(&*canvas));

    // microphone
    let mic_fill = if round.has_played_prompt { SUCCESS } else { MIC_IDLE };
    let mic = layout.mic_center;
    canvas.fill_circle(mic, layout.mic_radius, Paint::Solid(mic_fill));
    let glyph = Paint::Solid(Color::WHITE);
    canvas.fill_rect(Rect::new(mic.x - 15.0, mic.y - 25.0, 30.0, 35.0), glyph);
    canvas.fill_circle(mic + Vec2::new(0.0, 10.0), 20.0, glyph);
    canvas.fill_rect(Rect::new(mic.x - 5.0, mic.y + 20.0, 10.0, 15.0), glyph);
    canvas.fill_rect(Rect::new(mic.x - 20.0, mic.y + 30.0, 40.0, 8.0), glyph);

    let (instruction, color) = if !round.has_played_prompt {
        ("Click the microphone to hear the word", Color::WHITE)
    } else if round.complete {
        ("Correct! Get ready for the next round...", SUCCESS)
    } else {
        ("Type the word you heard and press Enter", Color::WHITE)
    };
    let style = TextStyle::new(INDICATOR_FONT_PX, color).outlined(Color::BLACK);
    canvas.text(instruction, layout.text_center, &style);

    if let Some(rect) = layout.input {
        draw_input_box(dictation, rect, canvas);
    }

    draw_progress(
        canvas,
        &format!("Round {}/{}", round.index, DICTATION_ROUNDS),
        round.index,
        DICTATION_ROUNDS,
        (Color::hex(0x2196F3), Color::hex(0x42A5F5)),
    );
}

fn draw_input_box(dictation: &DictationEngine, rect: Rect, canvas: &mut dyn Canvas) {
    canvas.fill_rounded_rect(rect, 20.0, Paint::Solid(Color::WHITE));

    let text = dictation.round().input.as_str();
    let origin = rect.origin + Vec2::splat(INPUT_PADDING / 2.0);
    let max_width = rect.width() - INPUT_PADDING;
    let style = TextStyle::new(INPUT_FONT_PX, INPUT_TEXT).aligned(Align::Left, Baseline::Top);

    let lines = greedy_lines(&CanvasMeasure(&*canvas), text, INPUT_FONT_PX, max_width);
    if text.is_empty() {
        let placeholder = TextStyle {
            color: PLACEHOLDER,
            ..style
        };
        canvas.text("Type the word you heard and press Enter", origin, &placeholder);
    } else {
        for (i, line) in lines.iter().enumerate() {
            let at = origin + Vec2::new(0.0, i as f32 * INPUT_LINE_HEIGHT);
            canvas.text(line, at, &style);
        }
    }

    if dictation.is_focused() && dictation.cursor_visible() {
        let last = lines.last().map(|l| l.trim()).unwrap_or_default();
        let cursor = origin
            + Vec2::new(
                canvas.measure_text(last, INPUT_FONT_PX),
                (lines.len().max(1) - 1) as f32 * INPUT_LINE_HEIGHT,
            );
        canvas.fill_rect(
            Rect {
                origin: cursor,
                size: Vec2::new(2.0, INPUT_LINE_HEIGHT),
            },
            Paint::Solid(INPUT_TEXT),
        );
    }
}

/// "Level n/4" label with a segmented progress bar, top right.
fn draw_progress(
    canvas: &mut dyn Canvas,
    label: &str,
    current: u8,
    total: u8,
    (from, to): (Color, Color),
) {
    let right = canvas.size().x - 20.0;
    let top = 60.0;
    let style = TextStyle::new(INDICATOR_FONT_PX, Color::WHITE)
        .outlined(Color::BLACK)
        .aligned(Align::Right, Baseline::Top);
    canvas.text(label, Vec2::new(right, top), &style);

    let bar = Rect::new(
        right - PROGRESS_BAR_WIDTH,
        top + 25.0,
        PROGRESS_BAR_WIDTH,
        PROGRESS_BAR_HEIGHT,
    );
    canvas.fill_rect(bar, Paint::Solid(BAR_TRACK));
    let progress = current.min(total) as f32 / total.max(1) as f32;
    canvas.fill_rect(
        Rect {
            origin: bar.origin,
            size: Vec2::new(bar.width() * progress, bar.height()),
        },
        Paint::Linear { from, to },
    );
    canvas.stroke_rect(bar, BAR_BORDER, 1.0);

    for i in 1..=total {
        let x = bar.x() + bar.width() / total as f32 * i as f32 - 1.0;
        let color = if i <= current { Color::WHITE } else { TICK_DIM };
        canvas.line(
            Vec2::new(x, bar.y() - 2.0),
            Vec2::new(x, bar.bottom() + 2.0),
            color,
            1.0,
        );
    }
}
