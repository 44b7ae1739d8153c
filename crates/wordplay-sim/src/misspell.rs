//! Misspelling generator for Word Hunter distractor cards.
//!
//! Random single edits are tried first. Affix variants and numbered variants
//! fill any shortfall, so the caller always gets exactly the number of words
//! it asked for.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use wordplay_core::constants::{
    AFFIX_FALLBACK_ATTEMPTS, AFFIX_MAX_VARIANT_LEN, AFFIX_MAX_WORD_LEN, ALPHABET, COMMON_PREFIXES,
    COMMON_SUFFIXES,
};

use crate::text::to_title_case;

/// Produce `count` Title-Cased misspellings of `word`, distinct from each
/// other and from `word` ignoring case.
pub fn generate_misspelled_words(word: &str, count: usize, rng: &mut ChaCha8Rng) -> Vec<String> {
    let working = word.to_uppercase();
    let chars: Vec<char> = working.chars().collect();
    let len = chars.len();
    let min_len = len.saturating_sub(3).max(3);
    let max_len = len + 4;

    let mut pool = Pool::new(&working);

    let max_attempts = (count * 10).max(50);
    let mut attempts = 0;
    while pool.len() < count && attempts < max_attempts {
        attempts += 1;
        let candidate = apply_random_edit(&chars, rng);
        let candidate_len = candidate.len();
        if candidate_len >= min_len && candidate_len <= max_len {
            pool.offer(candidate.into_iter().collect());
        }
    }

    if pool.len() < count {
        log::debug!(
            "misspellings of {:?}: {} of {} after {} edits, trying affixes",
            working,
            pool.len(),
            count,
            attempts
        );
    }
    let mut affix_attempts = 0;
    while pool.len() < count && affix_attempts < AFFIX_FALLBACK_ATTEMPTS {
        affix_attempts += 1;
        let variant = if len >= AFFIX_MAX_WORD_LEN {
            format!("{}{}", working, rng.gen_range(0..99))
        } else if rng.gen_bool(0.5) {
            let prefix = COMMON_PREFIXES[rng.gen_range(0..COMMON_PREFIXES.len())];
            format!("{}{}", prefix, working)
        } else {
            let suffix = COMMON_SUFFIXES[rng.gen_range(0..COMMON_SUFFIXES.len())];
            format!("{}{}", working, suffix)
        };
        if variant.chars().count() <= AFFIX_MAX_VARIANT_LEN {
            pool.offer(variant);
        }
    }

    let mut n = pool.len();
    if n < count {
        log::debug!(
            "misspellings of {:?}: numbering the last {}",
            working,
            count - n
        );
    }
    while pool.len() < count {
        n += 1;
        pool.offer(format!("{}{}", working, n));
    }

    pool.words.iter().map(|w| to_title_case(w)).collect()
}

/// Insertion-ordered set of accepted variants.
struct Pool<'a> {
    original: &'a str,
    seen: HashSet<String>,
    words: Vec<String>,
}

impl<'a> Pool<'a> {
    fn new(original: &'a str) -> Self {
        Self {
            original,
            seen: HashSet::new(),
            words: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn offer(&mut self, variant: String) {
        if variant != self.original && self.seen.insert(variant.clone()) {
            self.words.push(variant);
        }
    }
}

/// Apply one random edit. Long words keep their edges intact.
fn apply_random_edit(chars: &[char], rng: &mut ChaCha8Rng) -> Vec<char> {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let mut out = chars.to_vec();
    let len = chars.len();
    let long = len > 8;
    let roll: f64 = rng.gen();

    if roll < 0.3 && len > 1 {
        // substitute
        let pos = if long {
            rng.gen_range(1..len - 1)
        } else {
            rng.gen_range(0..len)
        };
        let replacement = loop {
            let c = alphabet[rng.gen_range(0..alphabet.len())];
            if c != out[pos] {
                break c;
            }
        };
        out[pos] = replacement;
    } else if roll < 0.5 && len > 3 {
        // delete
        let pos = if long {
            rng.gen_range(2..len - 2)
        } else {
            rng.gen_range(1..len - 1)
        };
        out.remove(pos);
    } else if roll < 0.7 {
        // insert
        let pos = if long {
            rng.gen_range(1..len - 1)
        } else {
            rng.gen_range(0..=len)
        };
        out.insert(pos, alphabet[rng.gen_range(0..alphabet.len())]);
    } else if roll < 0.85 {
        if len > 1 {
            let pos = if long {
                rng.gen_range(1..len - 2)
            } else {
                rng.gen_range(0..len - 1)
            };
            out.swap(pos, pos + 1);
        }
    } else if len > 1 {
        let pos = rng.gen_range(0..len);
        out.insert(pos, out[pos]);
    }
    out
}
