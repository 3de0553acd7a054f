use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::ClassifierOptions;
use crate::corpus::CountingMode;
use crate::score::{Aggregation, BigramRounding, Mode, Scorer};
use crate::vocabulary::{VocabularyFilter, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};

const APP_NAME: &str = "polarity";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub positive_corpus: PathBuf,
    pub negative_corpus: PathBuf,
    pub low_threshold: u64,
    pub high_threshold: u64,
    pub counting: CountingMode,
    pub aggregation: Aggregation,
    pub bigram_rounding: BigramRounding,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            positive_corpus: PathBuf::from("dataset/rt-polarity-pos.txt"),
            negative_corpus: PathBuf::from("dataset/rt-polarity-neg.txt"),
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            counting: CountingMode::default(),
            aggregation: Aggregation::default(),
            bigram_rounding: BigramRounding::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, confy::ConfyError> {
        match confy::load(APP_NAME, Some("config")) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("Failed to load config, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, Some("config"), self)
    }

    pub fn vocabulary_filter(&self) -> VocabularyFilter {
        VocabularyFilter::new(self.low_threshold, self.high_threshold)
    }

    pub fn classifier_options(&self, mode: Mode) -> ClassifierOptions {
        ClassifierOptions {
            filter: self.vocabulary_filter(),
            scorer: Scorer {
                aggregation: self.aggregation,
                rounding: self.bigram_rounding,
                ..Scorer::new(mode)
            },
            seed: self.seed,
        }
    }
}
