//! Frequency-band filtering of a corpus vocabulary.
//!
//! Words that appear almost everywhere carry no class signal, and words seen
//! only a handful of times cannot be estimated reliably. Both are dropped
//! from the counted vocabulary before any probability is estimated.

use ahash::AHashMap;

/// Default count at or below which a word is dropped.
pub const DEFAULT_LOW_THRESHOLD: u64 = 3;
/// Default count at or above which a word is dropped.
pub const DEFAULT_HIGH_THRESHOLD: u64 = 1000;

/// Keeps words whose count lies strictly between `low` and `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyFilter {
    pub low: u64,
    pub high: u64,
}

impl Default for VocabularyFilter {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl VocabularyFilter {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn retains(&self, count: u64) -> bool {
        self.low < count && count < self.high
    }

    /// Return the retained subset of `words`. The input is left untouched.
    pub fn apply(&self, words: &AHashMap<String, u64>) -> AHashMap<String, u64> {
        words
            .iter()
            .filter(|(_, &count)| self.retains(count))
            .map(|(word, &count)| (word.clone(), count))
            .collect()
    }
}
