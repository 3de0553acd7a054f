//! Polarity - sentence sentiment estimation from two labeled corpora.
//!
//! # Overview
//!
//! A positive and a negative corpus are loaded, normalized and counted.
//! Each query sentence is normalized the same way and scored against both
//! classes; the higher score wins.
//!
//! ```text
//! raw corpus text
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  Normalizer     │ ← symbol stripping, short-token removal (normalize.rs)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  Corpus         │ ← normalized text + word counts (corpus.rs)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  Vocabulary     │ ← drops too frequent / too rare words (vocabulary.rs)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  Estimator      │ ← unigram / bigram probabilities (estimator.rs)
//! │  Scorer         │ ← per-class sentence score (score.rs)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  Classifier     │ ← session state and verdict (classifier.rs)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use polarity::classifier::{Classifier, ClassifierOptions, Verdict};
//! use polarity::corpus::{Corpus, CountingMode, Label};
//! use polarity::score::{Mode, Scorer};
//! use polarity::vocabulary::VocabularyFilter;
//!
//! let positive = Corpus::load("good great good film", Label::Positive, CountingMode::Substring);
//! let negative = Corpus::load("bad awful bad film", Label::Negative, CountingMode::Substring);
//! let options = ClassifierOptions {
//!     filter: VocabularyFilter::new(0, 1000),
//!     scorer: Scorer::new(Mode::Unigram),
//!     seed: None,
//! };
//!
//! let mut classifier = Classifier::new(positive, negative, options).unwrap();
//! assert_eq!(classifier.classify("good film").unwrap(), Verdict::Positive);
//! ```

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod estimator;
pub mod normalize;
pub mod score;
pub mod vocabulary;

pub use classifier::{Classifier, Verdict};
pub use error::{PolarityError, Result};
