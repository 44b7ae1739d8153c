//! Gameplay constants and tuning parameters.
//!
//! Distances are canvas pixels, durations are milliseconds.

/// Frame duration the movement rates are tuned against (60 fps).
pub const BASELINE_FRAME_MS: f32 = 16.67;

// --- Canvas defaults ---

pub const DEFAULT_CANVAS_WIDTH: f32 = 1024.0;
pub const DEFAULT_CANVAS_HEIGHT: f32 = 768.0;

// --- Word Shooter ---

/// Letters a balloon may carry.
pub const BALLOON_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ -";

/// Balloon sprite edge length.
pub const BALLOON_SIZE: f32 = 48.0;

/// Minimum distance between a spawned balloon and the left/right canvas edge.
pub const BALLOON_SIDE_MARGIN: f32 = 20.0;

/// Balloons are pruned once their bottom edge passes `height - BALLOON_FLOOR_MARGIN`.
pub const BALLOON_FLOOR_MARGIN: f32 = 12.0;

/// Per-frame probability of spawning a balloon.
pub const BALLOON_SPAWN_PROBABILITY: f64 = 0.05;

/// Fall speed range (pixels per baseline frame), half-open.
pub const BALLOON_MIN_SPEED: f32 = 2.0;
pub const BALLOON_MAX_SPEED: f32 = 4.0;

/// Bullet rise speed (pixels per baseline frame).
pub const BULLET_SPEED: f32 = 8.0;

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 10.0;

/// Spaceship sprite edge length.
pub const SHIP_SIZE: f32 = 150.0;

/// Spaceship move speed (pixels per baseline frame).
pub const SHIP_SPEED: f32 = 10.0;

/// Gap between the spaceship and the bottom edge at spawn.
pub const SHIP_BOTTOM_MARGIN: f32 = 20.0;

// --- Word Hunter ---

/// Number of levels in a Word Hunter game.
pub const HUNTER_LEVELS: u8 = 4;

/// Natural card size before scaling.
pub const CARD_WIDTH: f32 = 400.0;
pub const CARD_HEIGHT: f32 = 80.0;

/// Gap between cards in the grid.
pub const CARD_PADDING: f32 = 12.0;

pub const CARD_CORNER_RADIUS: f32 = 20.0;

/// Words longer than this widen their cards.
pub const CARD_WIDE_WORD_LEN: usize = 10;

/// Horizontal margin subtracted from the canvas width when fitting the grid.
pub const GRID_HORIZONTAL_MARGIN: f32 = 40.0;

/// Vertical space reserved for the title and indicators.
pub const GRID_VERTICAL_RESERVE: f32 = 160.0;

/// Delay between clicking the correct card and the next level.
pub const CORRECT_ADVANCE_DELAY_MS: f64 = 800.0;

/// Delay before a wrongly clicked card becomes clickable again.
pub const WRONG_RESET_DELAY_MS: f64 = 1200.0;

// --- Misspelling generator ---

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const COMMON_PREFIXES: [&str; 7] = ["UN", "RE", "PRE", "MIS", "DE", "IN", "DIS"];

pub const COMMON_SUFFIXES: [&str; 8] = ["ED", "ING", "LY", "ION", "TION", "ER", "EST", "S"];

/// Attempts made by the affix fallback before numbering.
pub const AFFIX_FALLBACK_ATTEMPTS: u32 = 20;

/// Words at least this long skip affixes and get a numeric suffix instead.
pub const AFFIX_MAX_WORD_LEN: usize = 12;

/// Longest affix variant accepted.
pub const AFFIX_MAX_VARIANT_LEN: usize = 20;

// --- Word Hearo (dictation) ---

/// Number of listen-and-type rounds.
pub const DICTATION_ROUNDS: u8 = 4;

/// Delay between a correct answer and the next round.
pub const ROUND_ADVANCE_DELAY_MS: f64 = 1500.0;

/// Delay before a wrong answer is wiped from the input box.
pub const WRONG_INPUT_CLEAR_DELAY_MS: f64 = 100.0;

/// Cursor blink half-period.
pub const CURSOR_BLINK_MS: f32 = 500.0;

pub const MIC_SIZE: f32 = 80.0;

/// Extra radius around the microphone disc.
pub const MIC_RING: f32 = 10.0;

pub const DICTATION_SPACING: f32 = 40.0;
pub const DICTATION_TEXT_HEIGHT: f32 = 25.0;

pub const INPUT_MIN_WIDTH: f32 = 400.0;
pub const INPUT_MAX_WIDTH: f32 = 1200.0;
pub const INPUT_MIN_HEIGHT: f32 = 80.0;
pub const INPUT_PADDING: f32 = 30.0;
pub const INPUT_LINE_HEIGHT: f32 = 24.0;
pub const INPUT_FONT_PX: f32 = 18.0;

// --- Indicators ---

pub const TITLE_FONT_PX: f32 = 24.0;
pub const INDICATOR_FONT_PX: f32 = 18.0;
pub const PROGRESS_BAR_WIDTH: f32 = 120.0;
pub const PROGRESS_BAR_HEIGHT: f32 = 10.0;
