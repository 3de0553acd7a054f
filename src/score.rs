//! Sentence scoring for one class.
//!
//! # Unigram Mode
//!
//! The score is the product of P(w) over every word of the sentence,
//! duplicates included. One unseen word makes the whole score zero.
//!
//! # Bigram Mode
//!
//! The sentence is padded with a boundary sentinel on both sides and paired
//! offset-by-one, each pair holding the later word first:
//! ```text
//! words:  " "  good  film  " "
//! pairs:  (good, " ")  (film, good)  (" ", film)
//! ```
//! Each pair is scored by linear interpolation with a random smoothing term:
//! ```text
//! score(b) = λ3·R(P(b.1 | b.0)) + λ2·P(b.0) + λ1·x,   x ∈ {0.01 … 0.99}
//! ```
//! where `R` rounds to the nearest integer unless `BigramRounding::Exact` is
//! selected. With `Aggregation::LastValue` the sentence score is the score
//! of the last pair; with `Aggregation::Product` the pair scores are
//! multiplied onto the starting score P(first word).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::{PolarityError, Result};
use crate::estimator::ProbabilityTables;

/// Boundary marker padded around a sentence in bigram mode.
pub const SENTINEL: &str = " ";

/// Scoring strategy, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Bigram,
    Unigram,
}

impl FromStr for Mode {
    type Err = PolarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "b" | "bigram" => Ok(Mode::Bigram),
            "u" | "unigram" => Ok(Mode::Unigram),
            _ => Err(PolarityError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Bigram => write!(f, "bigram"),
            Mode::Unigram => write!(f, "unigram"),
        }
    }
}

/// How per-pair scores combine into a sentence score in bigram mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Each pair overwrites the running score; the last pair wins.
    #[default]
    LastValue,
    /// Running product of the starting score and every pair score.
    Product,
}

/// Treatment of the bigram ratio before interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BigramRounding {
    /// Round half to even, collapsing the ratio to 0 or 1.
    #[default]
    Nearest,
    /// Use the ratio as is.
    Exact,
}

impl BigramRounding {
    pub fn apply(self, p: f64) -> f64 {
        match self {
            BigramRounding::Nearest => p.round_ties_even(),
            BigramRounding::Exact => p,
        }
    }
}

/// Interpolation weights. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambdas {
    pub bigram: f64,
    pub unigram: f64,
    pub noise: f64,
}

impl Default for Lambdas {
    fn default() -> Self {
        Self {
            bigram: 0.5,
            unigram: 0.4,
            noise: 0.1,
        }
    }
}

/// Draw the smoothing term: a multiple of 0.01 in [0.01, 0.99].
pub fn sample_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(1..100u32) as f64 / 100.0
}

/// `[SENTINEL] + words + [SENTINEL]`
pub fn padded(words: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len() + 2);
    out.push(SENTINEL.to_string());
    out.extend(words.iter().cloned());
    out.push(SENTINEL.to_string());
    out
}

/// Offset-by-one pairs over the padded sentence, later word first.
pub fn bigram_pairs(words: &[String]) -> Vec<(String, String)> {
    let padded = padded(words);
    padded
        .windows(2)
        .map(|w| (w[1].clone(), w[0].clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scorer {
    pub mode: Mode,
    pub aggregation: Aggregation,
    pub rounding: BigramRounding,
    pub lambdas: Lambdas,
}

impl Scorer {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Estimate every probability the sentence needs against `corpus`.
    ///
    /// The estimates go into a fresh table so that a failure leaves the
    /// caller's accumulated tables untouched.
    ///
    /// # Errors
    /// Returns `EmptyVocabulary` if the corpus has no retained words.
    pub fn estimate(&self, words: &[String], corpus: &Corpus) -> Result<ProbabilityTables> {
        let mut staged = ProbabilityTables::new();
        match self.mode {
            Mode::Unigram => {
                for w in words {
                    staged.estimate_unigram(w, corpus)?;
                }
            }
            Mode::Bigram => {
                for w in padded(words) {
                    staged.estimate_unigram(&w, corpus)?;
                }
                for (prev, next) in bigram_pairs(words) {
                    staged.estimate_bigram(&prev, &next, corpus);
                }
            }
        }
        Ok(staged)
    }

    /// Score a normalized sentence from previously estimated probabilities.
    ///
    /// Missing table entries count as 0.
    pub fn score<R: Rng + ?Sized>(
        &self,
        words: &[String],
        tables: &ProbabilityTables,
        rng: &mut R,
    ) -> f64 {
        match self.mode {
            Mode::Unigram => words
                .iter()
                .map(|w| tables.unigram(w).unwrap_or(0.0))
                .product(),
            Mode::Bigram => self.bigram_score(words, tables, rng),
        }
    }

    fn bigram_score<R: Rng + ?Sized>(
        &self,
        words: &[String],
        tables: &ProbabilityTables,
        rng: &mut R,
    ) -> f64 {
        let mut score = words
            .first()
            .and_then(|w| tables.unigram(w))
            .filter(|&p| p != 0.0)
            .unwrap_or(1.0);

        for (prev, next) in bigram_pairs(words) {
            let bigram = self
                .rounding
                .apply(tables.bigram(&prev, &next).unwrap_or(0.0));
            let unigram = tables.unigram(&prev).unwrap_or(0.0);
            let noise = sample_noise(rng);

            let pair_score = self.lambdas.bigram * bigram
                + self.lambdas.unigram * unigram
                + self.lambdas.noise * noise;

            score = match self.aggregation {
                Aggregation::LastValue => pair_score,
                Aggregation::Product => score * pair_score,
            };
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CountingMode, Label};
    use crate::vocabulary::VocabularyFilter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn corpus(text: &str) -> Corpus {
        Corpus::load(text, Label::Positive, CountingMode::Substring)
            .filtered(&VocabularyFilter::new(0, 1000))
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("B".parse::<Mode>().unwrap(), Mode::Bigram);
        assert_eq!("unigram".parse::<Mode>().unwrap(), Mode::Unigram);
        assert_eq!(" u\n".parse::<Mode>().unwrap(), Mode::Unigram);
        assert!(matches!(
            "x".parse::<Mode>(),
            Err(PolarityError::UnknownMode(_))
        ));
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_bigram_pairs_order() {
        let pairs = bigram_pairs(&words("good film"));
        assert_eq!(
            pairs,
            vec![
                ("good".to_string(), " ".to_string()),
                ("film".to_string(), "good".to_string()),
                (" ".to_string(), "film".to_string()),
            ]
        );
        assert_eq!(bigram_pairs(&[]), vec![(" ".to_string(), " ".to_string())]);
    }

    #[test]
    fn test_noise_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = sample_noise(&mut rng);
            assert!((0.01..=0.99).contains(&x));
            assert_eq!((x * 100.0).round() / 100.0, x);
        }
    }

    #[test]
    fn test_rounding_ties_to_even() {
        assert_eq!(BigramRounding::Nearest.apply(0.5), 0.0);
        assert_eq!(BigramRounding::Nearest.apply(0.51), 1.0);
        assert_eq!(BigramRounding::Nearest.apply(1.0), 1.0);
        assert_eq!(BigramRounding::Exact.apply(0.5), 0.5);
    }

    #[test]
    fn test_unigram_score_is_product_with_duplicates() {
        let c = corpus("good great good film");
        let scorer = Scorer::new(Mode::Unigram);
        let sentence = words("good good film");
        let tables = scorer.estimate(&sentence, &c).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(scorer.score(&sentence, &tables, &mut rng), 0.5 * 0.5 * 0.25);
        assert_eq!(scorer.score(&words("good awful"), &tables, &mut rng), 0.0);
    }

    #[test]
    fn test_bigram_estimates_sentinel_and_pairs() {
        let c = corpus("good film good film");
        let scorer = Scorer::new(Mode::Bigram);
        let tables = scorer.estimate(&words("good film"), &c).unwrap();

        assert_eq!(tables.unigram_count(), 3);
        assert_eq!(tables.bigram_count(), 3);
        // "film good" occurs once, "film" twice.
        assert_eq!(tables.bigram("film", "good"), Some(0.5));
        assert!(tables.unigram(SENTINEL).is_some());
    }

    #[test]
    fn test_last_value_wins() {
        let c = corpus("good film good film");
        let sentence = words("good film");
        let scorer = Scorer::new(Mode::Bigram);
        let tables = scorer.estimate(&sentence, &c).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let score = scorer.score(&sentence, &tables, &mut rng);

        // Replay the draws: only the third pair (" ", film) matters.
        let mut replay = StdRng::seed_from_u64(42);
        let draws: Vec<f64> = (0..3).map(|_| sample_noise(&mut replay)).collect();
        let p_sentinel = tables.unigram(SENTINEL).unwrap();
        let expected = 0.5 * 0.0 + 0.4 * p_sentinel + 0.1 * draws[2];
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_product_aggregation() {
        let c = corpus("good film good film");
        let sentence = words("good film");
        let scorer = Scorer {
            aggregation: Aggregation::Product,
            rounding: BigramRounding::Exact,
            ..Scorer::new(Mode::Bigram)
        };
        let tables = scorer.estimate(&sentence, &c).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let score = scorer.score(&sentence, &tables, &mut rng);

        let mut replay = StdRng::seed_from_u64(3);
        let mut expected = tables.unigram("good").unwrap();
        for (prev, next) in bigram_pairs(&sentence) {
            let noise = sample_noise(&mut replay);
            expected *= 0.5 * tables.bigram(&prev, &next).unwrap()
                + 0.4 * tables.unigram(&prev).unwrap()
                + 0.1 * noise;
        }
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_fails_on_empty_vocabulary() {
        let c = Corpus::load("only once", Label::Negative, CountingMode::Substring)
            .filtered(&VocabularyFilter::default());
        let scorer = Scorer::new(Mode::Unigram);
        assert!(scorer.estimate(&words("once"), &c).is_err());
    }
}
