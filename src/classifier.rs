//! Classification sessions and the polarity decision rule.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::corpus::{Corpus, Label};
use crate::error::{PolarityError, Result};
use crate::estimator::ProbabilityTables;
use crate::normalize;
use crate::score::{Mode, Scorer};
use crate::vocabulary::VocabularyFilter;

/// Outcome of classifying one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Positive,
    Negative,
    Unknown,
}

impl Verdict {
    /// `Some(true)` for positive, `Some(false)` for negative, `None` on a tie.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Verdict::Positive => Some(true),
            Verdict::Negative => Some(false),
            Verdict::Unknown => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Positive => write!(f, "positive"),
            Verdict::Negative => write!(f, "negative"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Compare the two class scores.
///
/// Exact ties, including both scores being zero, are `Unknown`.
pub fn decide(positive: f64, negative: f64) -> Verdict {
    if negative < positive {
        Verdict::Positive
    } else if negative > positive {
        Verdict::Negative
    } else {
        Verdict::Unknown
    }
}

/// Per-class scores for one sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub positive: f64,
    pub negative: f64,
}

impl Scores {
    pub fn verdict(&self) -> Verdict {
        decide(self.positive, self.negative)
    }
}

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierOptions {
    pub filter: VocabularyFilter,
    pub scorer: Scorer,
    /// Seed for the smoothing term. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// A classification session.
///
/// Owns both filtered corpora and the probability tables that accumulate
/// across calls until [`Classifier::reset`].
#[derive(Debug, Clone)]
pub struct Classifier {
    positive: Corpus,
    negative: Corpus,
    positive_tables: ProbabilityTables,
    negative_tables: ProbabilityTables,
    scorer: Scorer,
    rng: StdRng,
}

/// A session shared between threads. The lock serializes table updates.
pub type SharedClassifier = Arc<Mutex<Classifier>>;

impl Classifier {
    /// Filter both corpora and start an empty session.
    ///
    /// # Errors
    /// Returns `LabelMismatch` if a corpus is passed in the wrong slot.
    pub fn new(positive: Corpus, negative: Corpus, options: ClassifierOptions) -> Result<Self> {
        Self::check_label(&positive, Label::Positive)?;
        Self::check_label(&negative, Label::Negative)?;

        let positive = positive.filtered(&options.filter);
        let negative = negative.filtered(&options.filter);
        for corpus in [&positive, &negative] {
            if corpus.total() == 0 {
                warn!(
                    "Vocabulary for the {} corpus is empty after filtering ({}..{})",
                    corpus.label(),
                    options.filter.low,
                    options.filter.high
                );
            } else {
                debug!(
                    "Retained {} {} words, total count {}",
                    corpus.vocabulary_size(),
                    corpus.label().short_name(),
                    corpus.total()
                );
            }
        }

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            positive,
            negative,
            positive_tables: ProbabilityTables::new(),
            negative_tables: ProbabilityTables::new(),
            scorer: options.scorer,
            rng,
        })
    }

    fn check_label(corpus: &Corpus, expected: Label) -> Result<()> {
        if corpus.label() != expected {
            return Err(PolarityError::LabelMismatch {
                expected,
                found: corpus.label(),
            });
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.scorer.mode
    }

    /// Score `sentence` against both classes.
    ///
    /// The sentence is normalized first. The probability tables are only
    /// updated when both classes could be estimated.
    ///
    /// # Errors
    /// Returns `EmptyVocabulary` if either class has no retained words.
    pub fn scores(&mut self, sentence: &str) -> Result<Scores> {
        let words = normalize::words(sentence);

        let positive_staged = self.scorer.estimate(&words, &self.positive)?;
        let negative_staged = self.scorer.estimate(&words, &self.negative)?;
        self.positive_tables.merge(positive_staged);
        self.negative_tables.merge(negative_staged);

        let positive = self
            .scorer
            .score(&words, &self.positive_tables, &mut self.rng);
        let negative = self
            .scorer
            .score(&words, &self.negative_tables, &mut self.rng);

        debug!("{:?}: pos={} neg={}", words, positive, negative);
        Ok(Scores { positive, negative })
    }

    /// Classify `sentence` as positive, negative or unknown.
    pub fn classify(&mut self, sentence: &str) -> Result<Verdict> {
        Ok(self.scores(sentence)?.verdict())
    }

    /// Drop every memoized probability.
    pub fn reset(&mut self) {
        self.positive_tables.clear();
        self.negative_tables.clear();
    }

    pub fn tables(&self, label: Label) -> &ProbabilityTables {
        match label {
            Label::Positive => &self.positive_tables,
            Label::Negative => &self.negative_tables,
        }
    }

    pub fn corpus(&self, label: Label) -> &Corpus {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
        }
    }

    pub fn into_shared(self) -> SharedClassifier {
        Arc::new(Mutex::new(self))
    }
}
