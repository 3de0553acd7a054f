//! Labeled corpus loading and occurrence counting.
//!
//! A corpus is built from a blob of example sentences, one per line. The
//! blob is normalized once and kept as a single string, because probability
//! estimation later counts arbitrary words and word pairs against it.
//!
//! # Corpus Files
//!
//! Corpus files are plain text with one sentence per line. The class of a
//! file is taken from its name:
//! ```text
//! dataset/rt-polarity-pos.txt   -> positive
//! dataset/rt-polarity-neg.txt   -> negative
//! ```
//!
//! # Counting
//!
//! Two counting modes are supported. `Substring` counts non-overlapping
//! occurrences anywhere in the text, so `"bad"` is also found inside
//! `"badly"`. `Token` only counts whole tokens and adjacent token pairs.

use std::fmt;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PolarityError, Result};
use crate::normalize::normalize;
use crate::vocabulary::VocabularyFilter;

/// Sentiment class of a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Short name used in corpus file names.
    pub fn short_name(self) -> &'static str {
        match self {
            Label::Positive => "pos",
            Label::Negative => "neg",
        }
    }

    /// Derive the label from a corpus file name.
    ///
    /// Only the final path component is inspected. `"pos"` wins when both
    /// markers are present.
    pub fn from_path(path: &Path) -> Option<Label> {
        let name = path.file_name()?.to_string_lossy();
        if name.contains("pos") {
            Some(Label::Positive)
        } else if name.contains("neg") {
            Some(Label::Negative)
        } else {
            None
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "positive"),
            Label::Negative => write!(f, "negative"),
        }
    }
}

/// How occurrences of a word are counted in the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Non-overlapping substring matches, not token-boundary aware.
    #[default]
    Substring,
    /// Whole-token matches only.
    Token,
}

/// A normalized corpus with its word frequency table.
#[derive(Debug, Clone)]
pub struct Corpus {
    label: Label,
    /// Normalized text, tokens separated by single spaces.
    text: String,
    /// Word -> occurrence count. Shrinks when filtered; `text` never does.
    words: AHashMap<String, u64>,
    /// Sum of the counts in `words`.
    total: u64,
    counting: CountingMode,
    /// Unfiltered token counts. Only filled in `Token` mode.
    token_counts: AHashMap<String, u64>,
    /// Adjacent token pair counts. Only filled in `Token` mode.
    pair_counts: AHashMap<(String, String), u64>,
}

impl Corpus {
    /// Build a corpus from raw text.
    ///
    /// # Example
    /// ```rust
    /// use polarity::corpus::{Corpus, CountingMode, Label};
    ///
    /// let corpus = Corpus::load("good great good film", Label::Positive, CountingMode::Substring);
    /// assert_eq!(corpus.count("good"), Some(2));
    /// ```
    pub fn load(raw: &str, label: Label, counting: CountingMode) -> Self {
        let text = normalize(raw);

        let mut token_counts: AHashMap<String, u64> = AHashMap::new();
        let mut pair_counts: AHashMap<(String, String), u64> = AHashMap::new();
        let words = match counting {
            CountingMode::Substring => {
                let mut words: AHashMap<String, u64> = AHashMap::new();
                for token in text.split(' ').filter(|t| !t.is_empty()) {
                    if !words.contains_key(token) {
                        let count = text.matches(token).count() as u64;
                        words.insert(token.to_string(), count);
                    }
                }
                words
            }
            CountingMode::Token => {
                let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();
                for token in &tokens {
                    *token_counts.entry(token.to_string()).or_insert(0) += 1;
                }
                for pair in tokens.windows(2) {
                    *pair_counts
                        .entry((pair[0].to_string(), pair[1].to_string()))
                        .or_insert(0) += 1;
                }
                token_counts.clone()
            }
        };
        let total = words.values().sum();

        Self {
            label,
            text,
            words,
            total,
            counting,
            token_counts,
            pair_counts,
        }
    }

    /// Read a corpus file, taking the label from the file name.
    ///
    /// # Errors
    /// Returns `UnlabeledCorpus` if the name contains neither `"pos"` nor
    /// `"neg"`, or an IO error if the file cannot be read.
    pub fn from_file(path: &Path, counting: CountingMode) -> Result<Self> {
        let label = Label::from_path(path)
            .ok_or_else(|| PolarityError::UnlabeledCorpus(path.to_path_buf()))?;
        let raw = fs::read_to_string(path)?;
        let corpus = Self::load(&raw, label, counting);

        info!(
            "Loaded {} corpus from {}: {} distinct words",
            label,
            path.display(),
            corpus.vocabulary_size()
        );
        Ok(corpus)
    }

    /// Copy of this corpus with the vocabulary filter applied.
    ///
    /// The normalized text is shared unchanged.
    pub fn filtered(&self, filter: &VocabularyFilter) -> Self {
        let words = filter.apply(&self.words);
        let total = words.values().sum();
        Self {
            label: self.label,
            text: self.text.clone(),
            words,
            total,
            counting: self.counting,
            token_counts: self.token_counts.clone(),
            pair_counts: self.pair_counts.clone(),
        }
    }

    /// Occurrences of `word` in the normalized text.
    pub fn occurrences(&self, word: &str) -> u64 {
        match self.counting {
            CountingMode::Substring => self.text.matches(word).count() as u64,
            CountingMode::Token => self.token_counts.get(word).copied().unwrap_or(0),
        }
    }

    /// Occurrences of `first` immediately followed by `second`.
    pub fn pair_occurrences(&self, first: &str, second: &str) -> u64 {
        match self.counting {
            CountingMode::Substring => {
                let joined = format!("{} {}", first, second);
                self.text.matches(joined.as_str()).count() as u64
            }
            CountingMode::Token => self
                .pair_counts
                .get(&(first.to_string(), second.to_string()))
                .copied()
                .unwrap_or(0),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn counting(&self) -> CountingMode {
        self.counting
    }

    /// Counted occurrences of a vocabulary word, if it is retained.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.words.get(word).copied()
    }

    pub fn words(&self) -> &AHashMap<String, u64> {
        &self.words
    }

    /// Sum of all retained word counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_keys_are_distinct_tokens() {
        let corpus = Corpus::load(
            "a great film, a great cast!\nterrible 3 ending",
            Label::Positive,
            CountingMode::Substring,
        );

        let tokens: Vec<&str> = corpus.text().split(' ').collect();
        for key in corpus.words().keys() {
            assert!(key.chars().count() >= 2);
            assert!(tokens.contains(&key.as_str()));
        }
        let mut distinct = tokens.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(corpus.vocabulary_size(), distinct.len());
        assert_eq!(corpus.count("great"), Some(2));
        assert_eq!(corpus.total(), 6);
    }

    #[test]
    fn test_substring_counting_overcounts() {
        let substring = Corpus::load("bad badly bad", Label::Negative, CountingMode::Substring);
        assert_eq!(substring.count("bad"), Some(3));
        assert_eq!(substring.count("badly"), Some(1));

        let token = Corpus::load("bad badly bad", Label::Negative, CountingMode::Token);
        assert_eq!(token.count("bad"), Some(2));
        assert_eq!(token.count("badly"), Some(1));
    }

    #[test]
    fn test_pair_occurrences() {
        let text = "not bad not bad at all not good";
        let substring = Corpus::load(text, Label::Negative, CountingMode::Substring);
        assert_eq!(substring.pair_occurrences("not", "bad"), 2);
        assert_eq!(substring.pair_occurrences("bad", "not"), 1);
        assert_eq!(substring.pair_occurrences("good", "not"), 0);

        let token = Corpus::load("ab abc ab", Label::Negative, CountingMode::Token);
        assert_eq!(token.pair_occurrences("ab", "ab"), 0);
        assert_eq!(token.pair_occurrences("ab", "abc"), 1);
        assert_eq!(token.pair_occurrences("ab", " "), 0);
    }

    #[test]
    fn test_token_counts_survive_filtering() {
        let text = "not bad not bad at all not good good";
        let corpus = Corpus::load(text, Label::Negative, CountingMode::Token);
        assert_eq!(corpus.count("not"), Some(3));
        assert_eq!(corpus.count("good"), Some(2));
        assert_eq!(corpus.total(), 9);
        assert_eq!(corpus.pair_occurrences("not", "bad"), 2);
        assert_eq!(corpus.pair_occurrences("good", "good"), 1);

        let filtered = corpus.filtered(&VocabularyFilter::new(2, 1000));
        assert_eq!(filtered.count("good"), None);
        assert_eq!(filtered.count("not"), Some(3));
        assert_eq!(filtered.total(), 3);
        assert_eq!(filtered.occurrences("good"), 2);
        assert_eq!(filtered.pair_occurrences("not", "good"), 1);
    }

    #[test]
    fn test_label_from_path() {
        assert_eq!(
            Label::from_path(Path::new("dataset/rt-polarity-pos.txt")),
            Some(Label::Positive)
        );
        assert_eq!(
            Label::from_path(Path::new("dataset/rt-polarity-neg.txt")),
            Some(Label::Negative)
        );
        assert_eq!(Label::from_path(Path::new("pos/reviews.txt")), None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews-neg.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dull and tedious").unwrap();
        writeln!(file, "tedious, dull.").unwrap();

        let corpus = Corpus::from_file(&path, CountingMode::Substring).unwrap();
        assert_eq!(corpus.label(), Label::Negative);
        assert_eq!(corpus.text(), "dull and tedious tedious dull");
        assert_eq!(corpus.count("dull"), Some(2));
    }

    #[test]
    fn test_from_file_without_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.txt");
        std::fs::write(&path, "whatever").unwrap();

        let err = Corpus::from_file(&path, CountingMode::Substring).unwrap_err();
        assert!(matches!(err, PolarityError::UnlabeledCorpus(_)));
    }
}
