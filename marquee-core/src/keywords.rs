//! Fallback keyword vocabulary for Discovery mode.

use rand::Rng;

/// Fixed vocabulary sampled when no explicit search term exists.
const DISCOVERY_VOCABULARY: [&str; 10] = [
    "love", "hero", "life", "dark", "day", "moon", "star", "war", "girl", "boy",
];

/// Supplies a fallback query term when no explicit search text exists.
///
/// Stateless and infallible. Every draw is independent, so repeated
/// Discovery fetches are idempotent in shape only, not in content.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordPicker;

impl KeywordPicker {
    /// Creates a new keyword picker.
    pub fn new() -> Self {
        Self
    }

    /// Draws a keyword uniformly at random from the vocabulary.
    pub fn pick(&self) -> &'static str {
        self.pick_with(&mut rand::rng())
    }

    /// Draws a keyword using the supplied randomness source.
    ///
    /// Lets tests pin the draw with a seeded generator.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        DISCOVERY_VOCABULARY[rng.random_range(0..DISCOVERY_VOCABULARY.len())]
    }

    /// True when `word` is part of the Discovery vocabulary.
    pub fn contains(word: &str) -> bool {
        DISCOVERY_VOCABULARY.contains(&word)
    }
}
