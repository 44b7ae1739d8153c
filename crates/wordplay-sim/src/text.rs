//! Random characters, casing helpers and measurement-based text wrapping.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use wordplay_core::constants::BALLOON_CHARSET;

/// Measures rendered text width. Implemented by every canvas; the session
/// also keeps one for layout work outside of drawing (click hit-tests).
pub trait TextMeasure {
    /// Width in pixels of `text` rendered at `font_px`.
    fn measure_text(&self, text: &str, font_px: f32) -> f32;
}

/// Fixed-advance measurement: every character is `font_px * advance` wide.
/// Used headless and in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure_text(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * font_px * self.advance
    }
}

/// Uniformly random balloon letter: `A-Z`, space or hyphen.
pub fn random_balloon_char(rng: &mut ChaCha8Rng) -> char {
    let charset: Vec<char> = BALLOON_CHARSET.chars().collect();
    charset[rng.gen_range(0..charset.len())]
}

/// First character upper-cased, the rest lower-cased.
pub fn to_title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Trim, lower-case and collapse internal whitespace runs to one space.
pub fn normalize_answer(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Wrap `text` into lines no wider than `max_width`, breaking words that do
/// not fit on their own at syllable boundaries.
pub fn wrap_text(measure: &dyn TextMeasure, text: &str, font_px: f32, max_width: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in text.split(' ') {
        if measure.measure_text(word, font_px) > max_width {
            lines.extend(break_long_word(measure, word, font_px, max_width));
            continue;
        }
        match lines.last_mut() {
            Some(last) => {
                let candidate = format!("{} {}", last, word);
                if measure.measure_text(&candidate, font_px) <= max_width {
                    *last = candidate;
                } else {
                    lines.push(word.to_string());
                }
            }
            None => lines.push(word.to_string()),
        }
    }
    lines
}

/// Split a single word into chunks, preferring syllable-like boundaries and
/// falling back to per-character splitting.
pub fn break_long_word(
    measure: &dyn TextMeasure,
    word: &str,
    font_px: f32,
    max_width: f32,
) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut points = syllable_break_points(&chars);
    points.push(chars.len());

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut last = 0;
    for &point in points.iter().skip(1) {
        let segment: String = chars[last..point].iter().collect();
        let candidate = format!("{}{}", current, segment);
        if measure.measure_text(&candidate, font_px) <= max_width {
            current = candidate;
        } else if !current.is_empty() {
            chunks.push(std::mem::replace(&mut current, segment));
        } else {
            chunks.extend(break_by_chars(measure, &segment, font_px, max_width));
        }
        last = point;
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    if chunks.is_empty() {
        return break_by_chars(measure, word, font_px, max_width);
    }
    chunks
}

/// Character-by-character split. A single character wider than `max_width`
/// still gets its own line.
pub fn break_by_chars(
    measure: &dyn TextMeasure,
    word: &str,
    font_px: f32,
    max_width: f32,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if measure.measure_text(&candidate, font_px) <= max_width {
            current = candidate;
        } else if !current.is_empty() {
            chunks.push(std::mem::replace(&mut current, ch.to_string()));
        } else {
            chunks.push(ch.to_string());
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Greedy word wrap keeping the trailing space after each word, the way the
/// input box lays out typed text. Always returns at least one line.
pub fn greedy_lines(
    measure: &dyn TextMeasure,
    text: &str,
    font_px: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (n, word) in text.split(' ').enumerate() {
        let candidate = format!("{}{} ", line, word);
        if measure.measure_text(&candidate, font_px) > max_width && n > 0 {
            lines.push(std::mem::replace(&mut line, format!("{} ", word)));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

const VOWELS: &str = "aeiou";
const SUFFIXES: [&str; 8] = ["tion", "sion", "ing", "ed", "er", "est", "ly", "ness"];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c.to_ascii_lowercase())
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Sorted, de-duplicated break offsets (char indices) starting with 0.
fn syllable_break_points(chars: &[char]) -> Vec<usize> {
    let mut points = vec![0];
    let len = chars.len();

    let mut scan_pairs = |first: fn(char) -> bool, second: fn(char) -> bool| {
        let mut i = 0;
        while i + 1 < len {
            if first(chars[i]) && second(chars[i + 1]) {
                if i + 2 < len {
                    points.push(i + 2);
                }
                i += 2;
            } else {
                i += 1;
            }
        }
    };
    scan_pairs(is_consonant, is_vowel);
    scan_pairs(is_vowel, is_consonant);

    let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
    let mut i = 0;
    while i < len {
        let hit = SUFFIXES.iter().find(|suffix| {
            let s: Vec<char> = suffix.chars().collect();
            lower[i..].starts_with(&s)
        });
        match hit {
            Some(suffix) => {
                let end = i + suffix.len();
                if end < len {
                    points.push(end);
                }
                i = end;
            }
            None => i += 1,
        }
    }

    points.sort_unstable();
    points.dedup();
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("dOG"), "Dog");
        assert_eq!(to_title_case("APPLE PIE"), "Apple pie");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  Apple "), "apple");
        assert_eq!(normalize_answer("Ice \t  Cream"), "ice cream");
        assert_eq!(normalize_answer("   "), "");
    }

    #[test]
    fn test_random_char_in_charset() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let c = random_balloon_char(&mut rng);
            assert!(BALLOON_CHARSET.contains(c), "unexpected char {:?}", c);
        }
    }

    #[test]
    fn test_wrap_fits_and_joins() {
        let m = MonospaceMeasure { advance: 1.0 };
        // 10px per char at font 10
        let lines = wrap_text(&m, "ab cd ef", 10.0, 50.0);
        assert_eq!(lines, vec!["ab cd", "ef"]);
    }

    #[test]
    fn test_long_word_is_split_within_width() {
        let m = MonospaceMeasure { advance: 1.0 };
        let lines = wrap_text(&m, "extraordinarily", 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.measure_text(line, 10.0) <= 60.0, "line too wide: {}", line);
        }
        assert_eq!(lines.concat(), "extraordinarily");
    }

    #[test]
    fn test_break_by_chars_forces_oversized_chars() {
        let m = MonospaceMeasure { advance: 1.0 };
        let chunks = break_by_chars(&m, "abc", 10.0, 5.0);
        assert_eq!(chunks, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_greedy_lines_counts() {
        let m = MonospaceMeasure { advance: 1.0 };
        assert_eq!(greedy_lines(&m, "", 10.0, 100.0).len(), 1);
        let lines = greedy_lines(&m, "aaaa bbbb cccc", 10.0, 100.0);
        assert_eq!(lines, vec!["aaaa bbbb ", "cccc "]);
    }
}
