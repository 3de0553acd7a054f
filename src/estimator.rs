//! Per-class unigram and bigram probability estimation.
//!
//! Probabilities are estimated on demand from occurrence counts in a class's
//! normalized corpus text, and memoized in a [`ProbabilityTables`] that keeps
//! growing as more sentences are scored.
//!
//! # Unigram
//!
//! ```text
//! P(w) = occurrences(w) / M
//! ```
//! where `M` is the sum of the counts retained by the vocabulary filter. The
//! numerator is counted over the full text while the denominator only covers
//! the filtered vocabulary, so the estimates do not sum to 1. The result is
//! rounded to 4 decimal places.
//!
//! # Bigram
//!
//! ```text
//! P(w1 | w0) = occurrences("w0 w1") / occurrences(w0)
//! ```
//! and exactly 0 when the pair never occurs.

use ahash::AHashMap;

use crate::corpus::Corpus;
use crate::error::{PolarityError, Result};

/// Round to 4 decimal places.
///
/// Formatting rounds the exact binary value, so 1/160 (stored just above
/// 0.00625) becomes 0.0063. Scaling by 10^4 first would round it down.
fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}

/// Unconditional probability of `word` in `corpus`.
///
/// # Errors
/// Returns `EmptyVocabulary` if the filtered vocabulary of the corpus is
/// empty, which would make the denominator zero.
pub fn unigram_probability(word: &str, corpus: &Corpus) -> Result<f64> {
    let total = corpus.total();
    if total == 0 {
        return Err(PolarityError::EmptyVocabulary(corpus.label()));
    }
    Ok(round4(corpus.occurrences(word) as f64 / total as f64))
}

/// Conditional probability of `next` following `prev` in `corpus`.
pub fn bigram_probability(prev: &str, next: &str, corpus: &Corpus) -> f64 {
    let joint = corpus.pair_occurrences(prev, next);
    if joint == 0 {
        return 0.0;
    }
    // joint > 0 implies prev occurs at least once
    joint as f64 / corpus.occurrences(prev) as f64
}

/// Memoized probabilities for one class.
#[derive(Debug, Clone, Default)]
pub struct ProbabilityTables {
    /// w -> P(w)
    unigrams: AHashMap<String, f64>,
    /// (w0, w1) -> P(w1 | w0), unrounded.
    bigrams: AHashMap<(String, String), f64>,
}

impl ProbabilityTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate P(word) and record it, overwriting any previous entry.
    pub fn estimate_unigram(&mut self, word: &str, corpus: &Corpus) -> Result<f64> {
        let p = unigram_probability(word, corpus)?;
        self.unigrams.insert(word.to_string(), p);
        Ok(p)
    }

    /// Estimate P(next | prev) and record it, overwriting any previous entry.
    pub fn estimate_bigram(&mut self, prev: &str, next: &str, corpus: &Corpus) -> f64 {
        let p = bigram_probability(prev, next, corpus);
        self.bigrams.insert((prev.to_string(), next.to_string()), p);
        p
    }

    pub fn unigram(&self, word: &str) -> Option<f64> {
        self.unigrams.get(word).copied()
    }

    pub fn bigram(&self, prev: &str, next: &str) -> Option<f64> {
        self.bigrams
            .get(&(prev.to_string(), next.to_string()))
            .copied()
    }

    /// Move every entry of `other` into `self`.
    pub fn merge(&mut self, other: ProbabilityTables) {
        self.unigrams.extend(other.unigrams);
        self.bigrams.extend(other.bigrams);
    }

    pub fn clear(&mut self) {
        self.unigrams.clear();
        self.bigrams.clear();
    }

    pub fn unigram_count(&self) -> usize {
        self.unigrams.len()
    }

    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty() && self.bigrams.is_empty()
    }
}
