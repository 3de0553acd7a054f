use std::path::PathBuf;

use thiserror::Error;

use crate::corpus::Label;

#[derive(Error, Debug)]
pub enum PolarityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confy::ConfyError),

    #[error("Unknown model type: {0:?} (expected B/bigram or U/unigram)")]
    UnknownMode(String),

    #[error("Cannot estimate: empty vocabulary for class {0}")]
    EmptyVocabulary(Label),

    #[error("Corpus file name must contain \"pos\" or \"neg\": {0}")]
    UnlabeledCorpus(PathBuf),

    #[error("Expected a {expected} corpus, got a {found} corpus")]
    LabelMismatch { expected: Label, found: Label },
}

pub type Result<T> = std::result::Result<T, PolarityError>;
